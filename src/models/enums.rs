use crate::directory::DirectoryError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($(#[$attr:meta])* $variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$attr])* #[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DirectoryError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DirectoryError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(Category {
    #[default]
    All => "All",
    Physician => "Physician",
    Orthopedics => "Orthopedics",
    Medicine => "Medicine",
    Cardiologist => "Cardiologist",
    Surgeon => "Surgeon",
    Oncology => "Oncology",
    Others => "Others",
});

/// Every category in display order, `All` first.
pub const ALL_CATEGORIES: [Category; 8] = [
    Category::All,
    Category::Physician,
    Category::Orthopedics,
    Category::Medicine,
    Category::Cardiologist,
    Category::Surgeon,
    Category::Oncology,
    Category::Others,
];

impl Category {
    /// `All` constrains nothing and is never carried by a practitioner.
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Self::All)
    }

    /// The seven labels a practitioner (or the assistant) may carry.
    pub fn practitioner_categories() -> impl Iterator<Item = Category> {
        ALL_CATEGORIES.into_iter().filter(|c| !c.is_sentinel())
    }
}
