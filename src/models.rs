//! Domain models collected by the data-entry and settings forms. None of these
//! are stored anywhere: the forms build them, log them, and drop them. They
//! exist so the rest of the code can talk about a satsang in typed terms
//! instead of passing raw field strings around.

use std::fmt;

use chrono::NaiveDate;

/// A closed set of options shown in a selector. `label` is exactly what the
/// UI renders, so it doubles as the lookup key when reading a form back.
pub trait Choice: Copy + Sized + 'static {
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|option| option.label() == label)
    }

    fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|option| option.label()).collect()
    }
}

/// Declare a `Choice` enum together with its labels and `Display`.
macro_rules! choice_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl Choice for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

choice_enum!(
    /// Day of the week, Monday first as on the data-entry form.
    Day {
        Monday => "Monday",
        Tuesday => "Tuesday",
        Wednesday => "Wednesday",
        Thursday => "Thursday",
        Friday => "Friday",
        Saturday => "Saturday",
        Sunday => "Sunday",
    }
);

impl Day {
    /// Sunday-first ordering used by the report filters.
    pub const SUNDAY_FIRST: [Day; 7] = [
        Day::Sunday,
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];
}

impl From<chrono::Weekday> for Day {
    fn from(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Mon => Day::Monday,
            chrono::Weekday::Tue => Day::Tuesday,
            chrono::Weekday::Wed => Day::Wednesday,
            chrono::Weekday::Thu => Day::Thursday,
            chrono::Weekday::Fri => Day::Friday,
            chrono::Weekday::Sat => Day::Saturday,
            chrono::Weekday::Sun => Day::Sunday,
        }
    }
}

choice_enum!(Language {
    English => "English",
    Hindi => "Hindi",
    Punjabi => "Punjabi",
});

choice_enum!(
    /// Who delivers the satsang, as picked on the data-entry form.
    PreacherType {
        SatsangKarta => "Satsang Karta (SK)",
        SatsangReader => "Satsang Reader (SR)",
        Cassette => "Cassette",
    }
);

choice_enum!(
    /// Abbreviated preacher categories offered by the report filters.
    PreacherCategory {
        Sk => "SK",
        Sr => "SR",
        Cassette => "Cassette",
        BaalSatsangKarta => "Baal Satsang Karta",
    }
);

choice_enum!(
    /// Recorded speaker, only relevant when the preacher type is Cassette.
    SatsangBy {
        HuzurMaharajJi => "Huzur Maharaj Ji",
        BabaJi => "Baba Ji",
    }
);

choice_enum!(Grade {
    A => "A",
    B => "B",
    C => "C",
    D => "D",
    E => "E",
});

choice_enum!(SatsangType {
    Main => "Main",
    Baal => "Baal",
});

choice_enum!(TimeSlot {
    Morning => "Morning",
    Evening => "Evening",
});

choice_enum!(Zone {
    Zone2 => "Zone-2",
    Zone3 => "Zone-3",
});

choice_enum!(StateName {
    Punjab => "Punjab",
    Haryana => "Haryana",
});

choice_enum!(Area {
    AreaA => "Area A",
    AreaB => "Area B",
});

choice_enum!(CentreType {
    C => "C",
    Sc => "SC",
    P => "P",
});

choice_enum!(Gender {
    Male => "Male",
    Female => "Female",
});

choice_enum!(Role {
    Organizer => "Organizer",
    ZonalStaff => "Zonal Staff",
    Admin => "Admin",
});

choice_enum!(
    /// Vehicle categories counted on the shared Vehicle Details section.
    VehicleKind {
        Bicycle => "Bicycle",
        Rickshaw => "Rickshaw",
        BullCart => "Bull-Cart",
        TwoWheeler => "Two-wheeler",
        ThreeWheeler => "Three-wheeler",
        Car => "Car",
        Jeep => "Jeep",
        Bus => "Bus",
        Truck => "Truck",
        TractorTrolley => "Tractor-Trolley",
    }
);

/// Start time on a quarter-hour grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartTime {
    pub hour: u8,
    pub minute: u8,
}

impl fmt::Display for StartTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Attendance split by category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SangatCount {
    pub gents: u32,
    pub ladies: u32,
    pub children: u32,
}

impl SangatCount {
    pub fn total(&self) -> u64 {
        u64::from(self.gents) + u64::from(self.ladies) + u64::from(self.children)
    }
}

/// Vehicle tallies keyed by [`VehicleKind`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleCounts {
    counts: [u32; 10],
}

impl VehicleCounts {
    fn index(kind: VehicleKind) -> usize {
        VehicleKind::ALL
            .iter()
            .position(|candidate| *candidate == kind)
            .unwrap_or_default()
    }

    pub fn get(&self, kind: VehicleKind) -> u32 {
        self.counts[Self::index(kind)]
    }

    pub fn set(&mut self, kind: VehicleKind, count: u32) {
        self.counts[Self::index(kind)] = count;
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().copied().map(u64::from).sum()
    }
}

/// The person (or recording) delivering the satsang.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preacher {
    pub kind: PreacherType,
    /// Set only for cassette satsangs.
    pub satsang_by: Option<SatsangBy>,
    /// Empty for cassette satsangs, where the name field is disabled.
    pub name: String,
}

/// A regular satsang as captured on the "Main Satsang Details" tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SatsangRecord {
    pub date: NaiveDate,
    pub day: Day,
    pub start: StartTime,
    pub duration_minutes: u32,
    pub language: Language,
    pub preacher: Preacher,
    pub grading: Option<Grade>,
    pub pathi_name: String,
    pub shabad_taken: String,
    pub bani_by: String,
    pub sangat: SangatCount,
    pub vehicles: VehicleCounts,
}

/// A children's satsang as captured on the "Baal Satsang Details" tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaalSatsangRecord {
    pub date: NaiveDate,
    pub start: StartTime,
    pub duration_minutes: u32,
    pub language: Language,
    pub preacher: Preacher,
    pub grading: Option<Grade>,
    pub children: u32,
    pub vehicles: VehicleCounts,
}

/// Whichever record the active data-entry tab produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SatsangEntry {
    Main(SatsangRecord),
    Baal(BaalSatsangRecord),
}

impl SatsangEntry {
    pub fn date(&self) -> NaiveDate {
        match self {
            SatsangEntry::Main(record) => record.date,
            SatsangEntry::Baal(record) => record.date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub phone: String,
    pub location: String,
    pub zone: Zone,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationSettings {
    pub email: bool,
    pub sms: bool,
    pub report_alerts: bool,
}

/// Everything on the Settings page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub profile: UserProfile,
    pub notifications: NotificationSettings,
}
