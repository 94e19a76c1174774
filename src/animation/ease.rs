/// Easing curves. Aliases accept the names used by common web animation libraries
/// (`"power3.out"`, `"none"`, `"easeInOut"`), so configs written for those read unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    #[default]
    #[serde(alias = "none", alias = "linear")]
    Linear,
    #[serde(alias = "power1.in")]
    InQuad,
    #[serde(alias = "power1.out")]
    OutQuad,
    #[serde(alias = "power1.inOut")]
    InOutQuad,
    #[serde(alias = "power2.in")]
    InCubic,
    #[serde(alias = "power2.out")]
    OutCubic,
    #[serde(alias = "power2.inOut")]
    InOutCubic,
    #[serde(alias = "power3.in")]
    InQuart,
    #[serde(alias = "power3.out")]
    OutQuart,
    #[serde(alias = "power3.inOut")]
    InOutQuart,
    #[serde(alias = "easeInOut", alias = "sine.inOut")]
    InOutSine,
}

impl Ease {
    pub const ALL: [Ease; 11] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InQuart,
        Ease::OutQuart,
        Ease::InOutQuart,
        Ease::InOutSine,
    ];

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InQuart => t.powi(4),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::InOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(4) / 2.0)
                }
            }
            Self::InOutSine => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    -((std::f64::consts::PI * t).cos() - 1.0) / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
