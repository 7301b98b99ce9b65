/// Угловая координата источника в виде "градусы/часы, минуты, секунды".
///
/// SIGPROC хранит такие углы как одно число double вида `hhmmss.s`
/// (прямое восхождение) или `ddmmss.s` (склонение).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyAngle {
    /// Отрицательный знак (только для склонения)
    pub negative: bool,
    /// Часы или градусы
    pub units: u32,
    pub minutes: u32,
    pub seconds: f64,
}

impl SkyAngle {
    pub fn new(
        negative: bool,
        units: u32,
        minutes: u32,
        seconds: f64,
    ) -> Self {
        Self {
            negative,
            units,
            minutes,
            seconds,
        }
    }

    /// Упаковка в формат SIGPROC: `units*10000 + minutes*100 + seconds`.
    pub fn to_sigproc(&self) -> f64 {
        let packed = self.units as f64 * 10_000.0 + self.minutes as f64 * 100.0 + self.seconds;
        if self.negative {
            -packed
        } else {
            packed
        }
    }
}

impl std::fmt::Display for SkyAngle {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let sign = if self.negative { "-" } else { "" };
        write!(
            f,
            "{sign}{:02}:{:02}:{}",
            self.units, self.minutes, self.seconds
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_sigproc() {
        let ra = SkyAngle::new(false, 17, 10, 3.984);
        assert!((ra.to_sigproc() - 171_003.984).abs() < 1e-9);

        let dec = SkyAngle::new(true, 12, 10, 58.8);
        assert!((dec.to_sigproc() + 121_058.8).abs() < 1e-9);
    }

    #[test]
    fn test_display() {
        assert_eq!(SkyAngle::new(false, 1, 2, 3.5).to_string(), "01:02:3.5");
        assert_eq!(SkyAngle::new(true, 12, 10, 58.8).to_string(), "-12:10:58.8");
    }
}
