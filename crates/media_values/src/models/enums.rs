//! Coded vocabularies used by pulldown and transition metadata.

use crate::coded_enumeration;

coded_enumeration! {
    /// Direction of a pulldown conversion between film and video rates.
    pub enum PulldownDirectionType {
        /// Input segment is at video rate, the owning track at film rate.
        TapeToFilmSpeed = 0,
        /// Input segment is at film rate, the owning track at video rate.
        FilmToTapeSpeed = 1,
    }
}

coded_enumeration! {
    /// Cadence used to map film frames onto video fields.
    pub enum PulldownKindType {
        /// 3:2 pulldown, 24 fps film to 29.97 fps NTSC.
        TwoThreePD = 0,
        /// 24 fps film run at 25 fps PAL.
        PALPD = 1,
        /// One film frame per NTSC frame.
        OneToOneNTSC = 2,
        /// One film frame per PAL frame.
        OneToOnePAL = 3,
        /// NTSC video tap from a film camera.
        VideoTapNTSC = 4,
        /// One film frame per 60 Hz HD frame.
        OneToOneHDSixty = 5,
        /// 24 to 60 frame cadence.
        TwentyFourToSixtyPD = 6,
        /// Each frame repeated twice.
        TwoToOnePD = 7,
    }
}

coded_enumeration! {
    /// Audio fade curve.
    pub enum FadeType {
        None = 0,
        LinearAmp = 1,
        LinearPower = 2,
    }
}

impl PulldownDirectionType {
    /// The opposite conversion direction.
    pub fn reversed(&self) -> Self {
        match self {
            Self::TapeToFilmSpeed => Self::FilmToTapeSpeed,
            Self::FilmToTapeSpeed => Self::TapeToFilmSpeed,
        }
    }
}
