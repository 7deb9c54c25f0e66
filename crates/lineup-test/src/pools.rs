//! Hand-made pools with known answers.

use lineup_core::Swimmer;

use crate::swimmer::{man, woman};

/// Five men with 50 m freestyle times only.
///
/// Best 4x50 freestyle team: the four fastest, 91 600 ms; the runner-up
/// swaps the slowest of them for the fifth man, 92 200 ms.
pub fn freestyle_men_50() -> Vec<Swimmer> {
    [22_300, 22_800, 23_100, 23_400, 24_000]
        .iter()
        .enumerate()
        .map(|(i, &ms)| man(&format!("m{}", i + 1), &[("50K", ms)]))
        .collect()
}

/// Two men and two women whose 100 m times allow exactly one medley order:
/// `back` backstroke, `breast` breaststroke, `fly` butterfly, `free`
/// freestyle.
pub fn mixed_medley_quartet() -> Vec<Swimmer> {
    vec![
        man("free", &[("100K", 50_000)]),
        woman("breast", &[("100P", 70_000)]),
        man("back", &[("100Z", 56_000)]),
        woman("fly", &[("100M", 60_000)]),
    ]
}

/// Three men with 100 m freestyle times 50 000, 51 000 and 49 000 ms.
pub fn league_single_event() -> Vec<Swimmer> {
    vec![
        man("a", &[("100m Freestyle", 50_000)]),
        man("b", &[("100m Freestyle", 51_000)]),
        man("c", &[("100m Freestyle", 49_000)]),
    ]
}

/// A small mixed club with realistic long-course times across strokes.
pub fn club() -> Vec<Swimmer> {
    vec![
        man(
            "novak",
            &[
                ("50K", 23_900),
                ("100K", 52_400),
                ("200K", 115_800),
                ("100Z", 59_300),
                ("50Z", 27_100),
            ],
        ),
        man(
            "svoboda",
            &[
                ("50K", 24_400),
                ("100K", 53_900),
                ("50M", 25_800),
                ("100M", 57_200),
                ("200M", 131_000),
            ],
        ),
        man(
            "dvorak",
            &[
                ("50P", 29_600),
                ("100P", 64_100),
                ("200P", 141_900),
                ("200O", 131_500),
            ],
        ),
        man(
            "cerny",
            &[
                ("400K", 250_300),
                ("1500K", 1_000_100),
                ("200K", 117_900),
                ("400O", 290_400),
            ],
        ),
        man("prochazka", &[("50K", 25_100), ("100Z", 61_800), ("200Z", 133_400)]),
        woman(
            "kucerova",
            &[
                ("50K", 26_800),
                ("100K", 58_300),
                ("200K", 126_900),
                ("50M", 28_900),
            ],
        ),
        woman(
            "vesela",
            &[
                ("50Z", 30_400),
                ("100Z", 65_200),
                ("200Z", 141_300),
                ("200O", 143_800),
            ],
        ),
        woman(
            "horakova",
            &[("50P", 33_100), ("100P", 72_400), ("200P", 156_000), ("100M", 66_100)],
        ),
        woman(
            "nemcova",
            &[
                ("400K", 276_500),
                ("1500K", 1_090_800),
                ("400O", 318_200),
                ("200M", 148_800),
            ],
        ),
        woman("pokorna", &[("50K", 27_400), ("100K", 59_900), ("50Z", 31_000)]),
    ]
}
