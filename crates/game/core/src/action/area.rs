/// Tiles affected by an impact, interpreted relative to the resolved target
/// tile and the acting side.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::AsRefStr,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AreaShape {
    /// Nothing on the field.
    None,
    /// Exactly the target tile.
    #[default]
    Single,
    /// The target's row on the target's side.
    Row,
    /// Every tile of the target's side.
    Side,
    /// Every tile of the actor's side except the actor's own tile.
    SideExcludingOneself,
    /// Every tile of both sides.
    All,
}
