use anyhow::{anyhow, Result};

/// Step 1 traces over the reference; step 2 draws freehand beside it and
/// optionally checks the answer with an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PracticeStep {
    #[default]
    Trace,
    Freehand,
}

impl PracticeStep {
    pub fn number(self) -> u8 {
        match self {
            Self::Trace => 1,
            Self::Freehand => 2,
        }
    }

    pub fn from_number(number: u8) -> Result<Self> {
        match number {
            1 => Ok(Self::Trace),
            2 => Ok(Self::Freehand),
            other => Err(anyhow!("unknown practice step {other}")),
        }
    }

    /// Whether the reference photo belongs in an exported image.
    pub fn includes_reference(self, answer_overlay: bool) -> bool {
        match self {
            Self::Trace => true,
            Self::Freehand => answer_overlay,
        }
    }
}
