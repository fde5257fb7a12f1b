use crate::constants::UNINHABITABLE_TEMP_C;

/// Named warning banners the presentation layer toggles. Once shown, a
/// banner stays up until the user dismisses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Banner {
    Freeze,
    Hot40,
    Hot50,
    Hot60,
    Hot70,
    Hot80,
    Hot100,
}

impl Banner {
    pub fn label(self) -> &'static str {
        match self {
            Banner::Freeze => "-50°C: Extreme freeze conditions",
            Banner::Hot40 => "40°C: Human survival threatened",
            Banner::Hot50 => "50°C: Water sources evaporating",
            Banner::Hot60 => "60°C: Most life cannot survive",
            Banner::Hot70 => "70°C: Oceans boiling at surface",
            Banner::Hot80 => "80°C: Human civilization ends",
            Banner::Hot100 => "100°C: All complex life extinct",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Cold,
    Hot,
}

/// One row of the static warning table. Immutable for the process
/// lifetime.
#[derive(Debug)]
pub struct WarningThreshold {
    pub temperature_bound: f32,
    pub category: Category,
    pub banner: Option<Banner>,
    pub message: &'static str,
}

/// Cold rows are matched most-extreme-first with `temperature <= bound`;
/// only the bottom of the scale raises a named banner.
pub static COLD_THRESHOLDS: [WarningThreshold; 3] = [
    WarningThreshold {
        temperature_bound: -50.0,
        category: Category::Cold,
        banner: Some(Banner::Freeze),
        message: "❄️ EXTREME COLD: -50°C Reached",
    },
    WarningThreshold {
        temperature_bound: -30.0,
        category: Category::Cold,
        banner: None,
        message: "❄️ ARCTIC CONDITIONS: -30°C",
    },
    WarningThreshold {
        temperature_bound: -10.0,
        category: Category::Cold,
        banner: None,
        message: "❄️ DEEP FREEZE: -10°C",
    },
];

/// Hot rows match on the interval `[bound, bound + 10)`. There is no 90°C
/// row: temperatures in [90, 100) raise no hot warning at all until the
/// terminal override kicks in.
pub static HOT_THRESHOLDS: [WarningThreshold; 6] = [
    WarningThreshold {
        temperature_bound: 40.0,
        category: Category::Hot,
        banner: Some(Banner::Hot40),
        message: "40°C: Human survival threatened",
    },
    WarningThreshold {
        temperature_bound: 50.0,
        category: Category::Hot,
        banner: Some(Banner::Hot50),
        message: "50°C: Water sources evaporating",
    },
    WarningThreshold {
        temperature_bound: 60.0,
        category: Category::Hot,
        banner: Some(Banner::Hot60),
        message: "60°C: Most life cannot survive",
    },
    WarningThreshold {
        temperature_bound: 70.0,
        category: Category::Hot,
        banner: Some(Banner::Hot70),
        message: "70°C: Oceans boiling at surface",
    },
    WarningThreshold {
        temperature_bound: 80.0,
        category: Category::Hot,
        banner: Some(Banner::Hot80),
        message: "80°C: Human civilization ends",
    },
    WarningThreshold {
        temperature_bound: 100.0,
        category: Category::Hot,
        banner: Some(Banner::Hot100),
        message: "100°C: All complex life extinct",
    },
];

pub const APOCALYPSE_MESSAGE: &str = "APOCALYPSE: Earth is now uninhabitable";

/// Result of one classification run: at most one cold and one hot ticker
/// message, plus the named banners to reveal.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdReport {
    pub cold_message: Option<&'static str>,
    pub hot_message: Option<&'static str>,
    pub banners: Vec<Banner>,
}

pub fn classify(temperature: f32) -> ThresholdReport {
    let cold = COLD_THRESHOLDS
        .iter()
        .find(|row| temperature <= row.temperature_bound);
    let hot = HOT_THRESHOLDS.iter().find(|row| {
        temperature >= row.temperature_bound && temperature < row.temperature_bound + 10.0
    });

    let mut banners: Vec<Banner> = cold
        .and_then(|row| row.banner)
        .into_iter()
        .chain(hot.and_then(|row| row.banner))
        .collect();

    let mut hot_message = hot.map(|row| row.message);
    if temperature >= UNINHABITABLE_TEMP_C {
        // Terminal state overrides whatever the interval scan produced.
        hot_message = Some(APOCALYPSE_MESSAGE);
        if !banners.contains(&Banner::Hot100) {
            banners.push(Banner::Hot100);
        }
    }

    ThresholdReport {
        cold_message: cold.map(|row| row.message),
        hot_message,
        banners,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn comfortable_temperature_raises_nothing() {
        let report = classify(15.0);
        assert_eq!(report.cold_message, None);
        assert_eq!(report.hot_message, None);
        assert!(report.banners.is_empty());
    }

    #[rstest]
    #[case(-50.0, "❄️ EXTREME COLD: -50°C Reached", true)]
    #[case(-35.0, "❄️ ARCTIC CONDITIONS: -30°C", false)]
    #[case(-30.0, "❄️ ARCTIC CONDITIONS: -30°C", false)]
    #[case(-12.0, "❄️ DEEP FREEZE: -10°C", false)]
    #[case(-10.0, "❄️ DEEP FREEZE: -10°C", false)]
    fn cold_matches_most_extreme_first(
        #[case] temperature: f32,
        #[case] expected: &str,
        #[case] freeze_banner: bool,
    ) {
        let report = classify(temperature);
        assert_eq!(report.cold_message, Some(expected));
        assert_eq!(report.banners.contains(&Banner::Freeze), freeze_banner);
    }

    #[test]
    fn clamped_minimum_temperature_shows_extreme_freeze() {
        // A pre-clamp -55°C arrives here as the clamped -50°C.
        let report = classify(-50.0);
        assert_eq!(report.cold_message, Some("❄️ EXTREME COLD: -50°C Reached"));
        assert!(report.banners.contains(&Banner::Freeze));
    }

    #[rstest]
    #[case(40.0, Banner::Hot40)]
    #[case(45.0, Banner::Hot40)]
    #[case(49.9, Banner::Hot40)]
    #[case(50.0, Banner::Hot50)]
    #[case(63.0, Banner::Hot60)]
    #[case(75.5, Banner::Hot70)]
    #[case(89.9, Banner::Hot80)]
    fn hot_interval_selects_single_banner(#[case] temperature: f32, #[case] expected: Banner) {
        let report = classify(temperature);
        assert_eq!(report.banners, vec![expected]);
        assert_eq!(report.hot_message, Some(expected.label()));
    }

    #[rstest]
    #[case(90.0)]
    #[case(95.0)]
    #[case(99.9)]
    fn gap_between_eighty_and_terminal_raises_no_hot_warning(#[case] temperature: f32) {
        let report = classify(temperature);
        assert_eq!(report.hot_message, None);
        assert!(report.banners.is_empty());
    }

    #[rstest]
    #[case(100.0)]
    #[case(105.0)]
    #[case(110.0)]
    #[case(120.0)]
    fn terminal_override_always_fires_at_or_above_100(#[case] temperature: f32) {
        let report = classify(temperature);
        assert_eq!(report.hot_message, Some(APOCALYPSE_MESSAGE));
        assert!(report.banners.contains(&Banner::Hot100));
    }

    #[test]
    fn cold_and_hot_are_evaluated_independently() {
        // Nothing in the domain can satisfy both, but classification must
        // not let one side short-circuit the other.
        let report = classify(-50.0);
        assert_eq!(report.hot_message, None);
        let report = classify(120.0);
        assert_eq!(report.cold_message, None);
    }
}
