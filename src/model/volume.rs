use crate::error::{JukeError, JukeResult};

/// User-facing volume level between [`Volume::MIN`] and [`Volume::MAX`].
///
/// The gain handed to the voice driver is `level / MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Volume {
    level: u8,
}

impl Volume {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 20;

    pub fn from_level(level: u8) -> JukeResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self { level })
        } else {
            Err(JukeError::InvalidVolume { min: Self::MIN, max: Self::MAX })
        }
    }

    /// Parses a chat argument. Missing, non-numeric and out of range input are all rejected.
    pub fn parse(arg: Option<&str>) -> JukeResult<Self> {
        let invalid = || JukeError::InvalidVolume { min: Self::MIN, max: Self::MAX };

        let level = arg.ok_or_else(invalid)?.trim().parse::<u8>().map_err(|_| invalid())?;

        Self::from_level(level)
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn ratio(&self) -> f32 {
        f32::from(self.level) / f32::from(Self::MAX)
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self { level: Self::MAX / 2 }
    }
}
