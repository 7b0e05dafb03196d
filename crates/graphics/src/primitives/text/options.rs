//! Serializable font options, converted to parley styles when laying out.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    #[default]
    Left,
    Right,
    Center,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum FontWeight {
    Light = 300,
    #[default]
    Normal = 400,
    Bold = 700,
}

#[derive(Clone, Debug, Default, PartialEq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    /// The name of a font family of choice.
    ///
    /// This must be a *Typographic Family* (ID 16) or a *Family Name* (ID 1) in terms of TrueType.
    Name(String),

    /// The default user interface font of the platform.
    #[default]
    SystemUi,

    SansSerif,

    /// The sole criterion of a monospace font is that all glyphs have the same fixed width.
    Monospace,
}

impl FontFamily {
    pub(crate) fn to_parley(&self) -> parley::FontFamily<'_> {
        match self {
            FontFamily::Name(name) => parley::FontFamily::Named(name.as_str().into()),
            FontFamily::SystemUi => parley::FontFamily::Generic(parley::GenericFamily::SystemUi),
            FontFamily::SansSerif => parley::FontFamily::Generic(parley::GenericFamily::SansSerif),
            FontFamily::Monospace => parley::FontFamily::Generic(parley::GenericFamily::Monospace),
        }
    }
}
