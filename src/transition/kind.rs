use crate::foundation::core::Fps;
use crate::foundation::error::{ReelError, ReelResult};
use crate::transition::fade::fade_phase_frames;

/// How a scene is entered from the one before it.
///
/// Manifests spell this as either the string `"cut"` or a number of seconds. Anything else
/// (notably a boolean) is rejected at parse time rather than coerced to `0.0`/`1.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Transition {
    /// The new scene appears directly, no intermediate frames.
    #[default]
    Cut,
    /// Two-phase fade through black lasting `secs` seconds (split evenly between phases).
    Fade {
        /// Total fade duration in seconds; finite and `>= 0`.
        secs: f64,
    },
}

impl Transition {
    /// Build a fade; `0` seconds normalizes to [`Transition::Cut`].
    pub fn fade(secs: f64) -> ReelResult<Self> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(ReelError::validation(format!(
                "transition duration must be finite and >= 0 (got {secs})"
            )));
        }
        if secs == 0.0 {
            return Ok(Self::Cut);
        }
        Ok(Self::Fade { secs })
    }

    /// Re-check a value that may have been built literally.
    pub fn validate(self) -> ReelResult<()> {
        match self {
            Self::Cut => Ok(()),
            Self::Fade { secs } => Self::fade(secs).map(|_| ()),
        }
    }

    /// Number of ticks this transition occupies at `fps`.
    pub fn frame_count(self, fps: Fps) -> ReelResult<u64> {
        match self {
            Self::Cut => Ok(0),
            Self::Fade { secs } => fade_phase_frames(secs, fps)?
                .checked_mul(2)
                .ok_or_else(|| ReelError::precondition("transition frame count overflows")),
        }
    }
}

impl serde::Serialize for Transition {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Cut => serializer.serialize_str("cut"),
            Self::Fade { secs } => serializer.serialize_f64(*secs),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Transition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct TransitionVisitor;

        impl serde::de::Visitor<'_> for TransitionVisitor {
            type Value = Transition;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("transition duration in seconds or \"cut\"")
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Transition, E> {
                Transition::fade(v).map_err(E::custom)
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Transition, E> {
                self.visit_f64(v as f64)
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Transition, E> {
                self.visit_f64(v as f64)
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Transition, E> {
                match v.trim().to_ascii_lowercase().as_str() {
                    "cut" | "instant" | "none" => Ok(Transition::Cut),
                    other => Err(E::custom(format!("unknown transition '{other}'"))),
                }
            }
        }

        deserializer.deserialize_any(TransitionVisitor)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/kind.rs"]
mod tests;
