//! Type definitions for font-face synthesis

use std::fmt;

/// Weight names checked against a font file name, in priority order
///
/// The first name that occurs in the file name wins. `Bold` precedes
/// `ExtraBold`, so `ExtraBold` files resolve to 700.
pub const WEIGHT_TABLE: [(&str, u16); 9] = [
    ("Thin", 100),
    ("ExtraLight", 200),
    ("Light", 300),
    ("Regular", 400),
    ("Medium", 500),
    ("SemiBold", 600),
    ("Bold", 700),
    ("ExtraBold", 800),
    ("Black", 900),
];

/// Style names checked against a font file name, in priority order
pub const STYLE_TABLE: [(&str, FontStyle); 2] =
    [("Italic", FontStyle::Italic), ("Normal", FontStyle::Normal)];

/// Font weight inferred from a file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    /// A weight on the 100–900 scale
    Numeric(u16),
    /// No weight name found in the file name; rendered as `normal`
    Unspecified,
}

impl FontWeight {
    /// Infer the weight from a font file name
    #[must_use]
    pub fn from_file_name(file_name: &str) -> Self {
        WEIGHT_TABLE
            .iter()
            .find(|(name, _)| file_name.contains(name))
            .map_or(Self::Unspecified, |&(_, value)| Self::Numeric(value))
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontWeight::Numeric(value) => write!(f, "{value}"),
            FontWeight::Unspecified => write!(f, "normal"),
        }
    }
}

/// Font style inferred from a file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Normal,
    Italic,
}

impl FontStyle {
    /// Infer the style from a font file name, falling back to `Normal`
    #[must_use]
    pub fn from_file_name(file_name: &str) -> Self {
        STYLE_TABLE
            .iter()
            .find(|(name, _)| file_name.contains(name))
            .map_or(Self::Normal, |&(_, style)| style)
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontStyle::Normal => write!(f, "normal"),
            FontStyle::Italic => write!(f, "italic"),
        }
    }
}

/// Font file formats served by the font host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFormat {
    Woff2,
    Ttf,
    Woff,
}

impl FontFormat {
    /// All formats, in the order they are tried when matching an extension
    pub const ALL: [FontFormat; 3] = [FontFormat::Woff2, FontFormat::Ttf, FontFormat::Woff];

    /// File extension, also used verbatim in `format(...)`
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            FontFormat::Woff2 => "woff2",
            FontFormat::Ttf => "ttf",
            FontFormat::Woff => "woff",
        }
    }

    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.extension() == extension)
    }
}

impl fmt::Display for FontFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A hosted font file discovered in page markup
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontReference {
    pub url: String,
    pub weight: FontWeight,
    pub style: FontStyle,
    pub format: FontFormat,
}

impl FontReference {
    /// Build a reference from a matched font URL and its format
    ///
    /// Weight and style come from the last path segment only.
    #[must_use]
    pub fn from_url(url: &str, format: FontFormat) -> Self {
        let file_name = url.rsplit('/').next().unwrap_or(url);
        Self {
            url: url.to_string(),
            weight: FontWeight::from_file_name(file_name),
            style: FontStyle::from_file_name(file_name),
            format,
        }
    }
}

/// One `@font-face` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFaceRule {
    pub family: String,
    pub reference: FontReference,
}

impl fmt::Display for FontFaceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "@font-face {{")?;
        writeln!(f, "  font-family: '{}';", self.family)?;
        writeln!(
            f,
            "  src: url('{}') format('{}');",
            self.reference.url, self.reference.format
        )?;
        writeln!(f, "  font-weight: {};", self.reference.weight)?;
        writeln!(f, "  font-style: {};", self.reference.style)?;
        writeln!(f, "}}")
    }
}
