use strum::{Display, EnumString, IntoStaticStr, VariantArray};

/// Identifier of one unit color. Any value is a valid color; the crate never interprets it beyond equality and ordering.
pub type ColorID = u8;

/// Named colors from the game's levels, for building puzzles readably.
///
/// Discriminants start at 1 and are the [`ColorID`]s the variants convert into.
#[derive(Copy, Clone, Debug, Display, EnumString, Eq, Hash, IntoStaticStr, Ord, PartialEq, PartialOrd, VariantArray)]
#[strum(serialize_all = "snake_case")]
pub enum Palette {
    /// Dry green.
    DryGreen = 1,
    /// Gray.
    Gray,
    /// Lush green.
    LushGreen,
    /// Pink.
    Pink,
    /// Brown.
    Brown,
    /// Light blue.
    LightBlue,
    /// Lime green.
    LimeGreen,
    /// Dark blue.
    DarkBlue,
    /// Yellow.
    Yellow,
    /// Purple.
    Purple,
    /// Red.
    Red,
    /// The saturated blue, distinct from light and dark blue.
    BlueBlue,
}

impl Palette {
    /// Look up the palette entry for `id`, if there is one.
    pub fn from_id(id: ColorID) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|color| ColorID::from(*color) == id)
    }
}

impl From<Palette> for ColorID {
    fn from(value: Palette) -> Self {
        value as ColorID
    }
}
