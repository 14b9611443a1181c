//! Style catalog.
//!
//! Maps a symbolic style tag to a concrete visual/format spec. The catalog is
//! fixed: tags are a closed enum and every tag resolves to exactly one spec,
//! so style lookup cannot fail. Only the fonts are configurable, per catalog.

/// Symbolic cell style category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTag {
    /// Report title, merged across the header columns.
    Title,
    /// Column header row.
    Header,
    /// Footer caption cells.
    Bottom,
    /// Leading serial-number column.
    SerialNumber,
    /// Data cell classified as a date.
    Date,
    /// Data cell classified as a decimal number.
    Decimal,
    /// Data cell fallback (text).
    Default,
}

/// Border line weight for one cell edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderWeight {
    #[default]
    None,
    Thin,
    Medium,
}

impl BorderWeight {
    /// Line width in page units for canvas rendering.
    #[must_use]
    pub fn width(self) -> f32 {
        match self {
            BorderWeight::None => 0.0,
            BorderWeight::Thin => 1.0,
            BorderWeight::Medium => 2.0,
        }
    }

    /// OOXML border style attribute value, if any.
    #[must_use]
    pub fn ooxml_name(self) -> Option<&'static str> {
        match self {
            BorderWeight::None => None,
            BorderWeight::Thin => Some("thin"),
            BorderWeight::Medium => Some("medium"),
        }
    }
}

/// Per-edge borders of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Borders {
    pub top: BorderWeight,
    pub left: BorderWeight,
    pub right: BorderWeight,
    pub bottom: BorderWeight,
}

impl Borders {
    /// No borders on any edge.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// The same weight on all four edges.
    #[must_use]
    pub fn all(weight: BorderWeight) -> Self {
        Self {
            top: weight,
            left: weight,
            right: weight,
            bottom: weight,
        }
    }

    /// A bottom border only (footer underline cells).
    #[must_use]
    pub fn bottom_only(weight: BorderWeight) -> Self {
        Self {
            bottom: weight,
            ..Self::default()
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    /// Type-dependent alignment (numbers right, text left).
    #[default]
    General,
    Left,
    Center,
    Right,
}

impl HAlign {
    /// OOXML alignment attribute value; `General` is the implicit default and
    /// emits no attribute.
    #[must_use]
    pub fn ooxml_name(self) -> Option<&'static str> {
        match self {
            HAlign::General => None,
            HAlign::Left => Some("left"),
            HAlign::Center => Some("center"),
            HAlign::Right => Some("right"),
        }
    }
}

/// A concrete font description.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub name: String,
    pub size_pt: f32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikeout: bool,
}

impl FontSpec {
    /// A plain font of the given size.
    #[must_use]
    pub fn new(name: &str, size_pt: f32) -> Self {
        Self {
            name: name.to_string(),
            size_pt,
            bold: false,
            italic: false,
            underline: false,
            strikeout: false,
        }
    }

    /// Same font with bold weight.
    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Immutable visual/format spec for one style tag.
///
/// Built fresh per lookup; cheap and never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct CellStyleSpec {
    pub align_h: HAlign,
    pub borders: Borders,
    pub font: FontSpec,
    /// Number format pattern applied to the cell value, if any.
    pub number_format: Option<&'static str>,
}

/// Default font family used for every report font.
pub const DEFAULT_FONT_NAME: &str = "Calibri";

/// The fixed style catalog plus the four configurable report fonts.
#[derive(Debug, Clone)]
pub struct StyleCatalog {
    pub title_font: FontSpec,
    pub header_font: FontSpec,
    pub content_font: FontSpec,
    pub footer_font: FontSpec,
}

impl Default for StyleCatalog {
    fn default() -> Self {
        Self {
            title_font: FontSpec::new(DEFAULT_FONT_NAME, 15.0).bold(),
            header_font: FontSpec::new(DEFAULT_FONT_NAME, 10.0).bold(),
            content_font: FontSpec::new(DEFAULT_FONT_NAME, 9.0),
            footer_font: FontSpec::new(DEFAULT_FONT_NAME, 10.0).bold(),
        }
    }
}

impl StyleCatalog {
    /// Resolve a style tag to its concrete spec.
    ///
    /// `font_override` replaces the catalog font for this lookup only; borders,
    /// alignment, and number format are fixed per tag.
    #[must_use]
    pub fn spec_for(&self, tag: StyleTag, font_override: Option<&FontSpec>) -> CellStyleSpec {
        let font = |default: &FontSpec| font_override.unwrap_or(default).clone();
        match tag {
            StyleTag::Title => CellStyleSpec {
                align_h: HAlign::Center,
                borders: Borders::none(),
                font: font(&self.title_font),
                number_format: None,
            },
            StyleTag::Header => CellStyleSpec {
                align_h: HAlign::Center,
                borders: Borders::all(BorderWeight::Medium),
                font: font(&self.header_font),
                number_format: None,
            },
            StyleTag::Bottom => CellStyleSpec {
                align_h: HAlign::Right,
                borders: Borders::none(),
                font: font(&self.footer_font),
                number_format: None,
            },
            StyleTag::SerialNumber => CellStyleSpec {
                align_h: HAlign::Center,
                borders: Borders::all(BorderWeight::Thin),
                font: font(&self.content_font).bold(),
                number_format: None,
            },
            StyleTag::Date => CellStyleSpec {
                align_h: HAlign::General,
                borders: Borders::all(BorderWeight::Thin),
                font: font(&self.content_font),
                number_format: Some("yyyy-mm-dd"),
            },
            StyleTag::Decimal => CellStyleSpec {
                align_h: HAlign::General,
                borders: Borders::all(BorderWeight::Thin),
                font: font(&self.content_font),
                number_format: Some("0.00"),
            },
            StyleTag::Default => CellStyleSpec {
                align_h: HAlign::Left,
                borders: Borders::all(BorderWeight::Thin),
                font: font(&self.content_font),
                number_format: None,
            },
        }
    }
}
