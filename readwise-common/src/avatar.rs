//! Avatar descriptor generation
//!
//! A descriptor is a set of cosmetic attribute choices, each drawn from a small
//! fixed domain. Generation is a pure function of the supplied random source so
//! that a seeded RNG reproduces the same descriptor.
//!
//! Wire form is camelCase with colors as hex strings, which is what the
//! backend stores and what the avatar renderer on other clients reads.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

macro_rules! attribute_domain {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every value in the domain, in display order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire representation
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            fn pick<R: Rng + ?Sized>(rng: &mut R) -> Self {
                *Self::ALL
                    .choose(rng)
                    .unwrap_or(&Self::ALL[0])
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::Error;

            fn from_str(s: &str) -> crate::Result<Self> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(crate::Error::InvalidInput(format!(
                        "unknown {} '{}'",
                        stringify!($name),
                        other
                    ))),
                }
            }
        }
    };
}

attribute_domain!(
    /// Avatar body type
    Sex { Man => "man", Woman => "woman" }
);

attribute_domain!(
    HairStyle {
        Normal => "normal",
        Thick => "thick",
        Mohawk => "mohawk",
        WomanLong => "womanLong",
        WomanShort => "womanShort",
    }
);

attribute_domain!(
    HairColor {
        Black => "#000",
        White => "#fff",
        Peach => "#f9c9b6",
        Tan => "#ab8876",
        Auburn => "#78311f",
    }
);

attribute_domain!(
    FaceColor {
        Light => "#f9c9b6",
        Medium => "#ecad80",
        Tan => "#9e5622",
        Dark => "#4c1b07",
    }
);

attribute_domain!(EarSize { Small => "small", Big => "big" });

attribute_domain!(EyeStyle { Circle => "circle", Oval => "oval", Smile => "smile" });

attribute_domain!(NoseStyle { Short => "short", Long => "long", Round => "round" });

attribute_domain!(MouthStyle { Smile => "smile", Laugh => "laugh", Peace => "peace" });

attribute_domain!(
    /// `None` means no glasses
    GlassesStyle { None => "none", Round => "round", Square => "square" }
);

attribute_domain!(ShirtStyle { Hoody => "hoody", Short => "short", Polo => "polo" });

/// Structured record of cosmetic attribute choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AvatarDescriptor {
    pub sex: Sex,
    pub face_color: FaceColor,
    pub ear_size: EarSize,
    pub hair_style: HairStyle,
    pub hair_color: HairColor,
    pub eye_style: EyeStyle,
    pub nose_style: NoseStyle,
    pub mouth_style: MouthStyle,
    pub glasses_style: GlassesStyle,
    pub shirt_style: ShirtStyle,
}

impl Default for AvatarDescriptor {
    fn default() -> Self {
        Self {
            sex: Sex::Man,
            face_color: FaceColor::Light,
            ear_size: EarSize::Small,
            hair_style: HairStyle::Normal,
            hair_color: HairColor::Black,
            eye_style: EyeStyle::Circle,
            nose_style: NoseStyle::Short,
            mouth_style: MouthStyle::Smile,
            glasses_style: GlassesStyle::None,
            shirt_style: ShirtStyle::Hoody,
        }
    }
}

/// Single-attribute edit; applying it leaves every other attribute untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarEdit {
    Sex(Sex),
    FaceColor(FaceColor),
    EarSize(EarSize),
    HairStyle(HairStyle),
    HairColor(HairColor),
    EyeStyle(EyeStyle),
    NoseStyle(NoseStyle),
    MouthStyle(MouthStyle),
    GlassesStyle(GlassesStyle),
    ShirtStyle(ShirtStyle),
}

impl AvatarDescriptor {
    /// Draw every attribute uniformly from its domain
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            sex: Sex::pick(rng),
            face_color: FaceColor::pick(rng),
            ear_size: EarSize::pick(rng),
            hair_style: HairStyle::pick(rng),
            hair_color: HairColor::pick(rng),
            eye_style: EyeStyle::pick(rng),
            nose_style: NoseStyle::pick(rng),
            mouth_style: MouthStyle::pick(rng),
            glasses_style: GlassesStyle::pick(rng),
            shirt_style: ShirtStyle::pick(rng),
        }
    }

    /// Draw from the thread-local RNG
    pub fn random() -> Self {
        Self::generate(&mut rand::thread_rng())
    }

    /// Overwrite one attribute
    pub fn apply(&mut self, edit: AvatarEdit) {
        match edit {
            AvatarEdit::Sex(v) => self.sex = v,
            AvatarEdit::FaceColor(v) => self.face_color = v,
            AvatarEdit::EarSize(v) => self.ear_size = v,
            AvatarEdit::HairStyle(v) => self.hair_style = v,
            AvatarEdit::HairColor(v) => self.hair_color = v,
            AvatarEdit::EyeStyle(v) => self.eye_style = v,
            AvatarEdit::NoseStyle(v) => self.nose_style = v,
            AvatarEdit::MouthStyle(v) => self.mouth_style = v,
            AvatarEdit::GlassesStyle(v) => self.glasses_style = v,
            AvatarEdit::ShirtStyle(v) => self.shirt_style = v,
        }
    }

    /// Copy with one attribute replaced
    pub fn with(mut self, edit: AvatarEdit) -> Self {
        self.apply(edit);
        self
    }
}
