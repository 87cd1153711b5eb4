/// Control commands decoded by the presentation layer and dispatched once per tick.
///
/// The pipeline never sees input-device vocabulary, only these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    IncreaseBrightness,
    DecreaseBrightness,
    IncreaseContrast,
    DecreaseContrast,
    IncreaseSaturation,
    DecreaseSaturation,
    IncreaseBlackPoint,
    DecreaseBlackPoint,
    IncreaseWhitePoint,
    DecreaseWhitePoint,
    IncreaseHorizontalSync,
    DecreaseHorizontalSync,
    IncreaseVerticalSync,
    DecreaseVerticalSync,
    RollUp,
    RollDown,
    IncreaseNoise,
    DecreaseNoise,
    ToggleColor,
    ToggleField,
    ToggleProgressive,
    ToggleRaw,
    Reset,
    TogglePlay,
    StepForward,
    StepBackward,
}

impl Command {
    /// Commands that only make sense while driving a numbered frame sequence.
    pub fn is_transport(self) -> bool {
        matches!(
            self,
            Self::TogglePlay | Self::StepForward | Self::StepBackward
        )
    }
}
