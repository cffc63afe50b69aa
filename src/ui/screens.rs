use std::ops::RangeInclusive;

use chrono::{Datelike, Days, NaiveDate};

use crate::models::{
    Area, BaalSatsangRecord, CentreType, Choice, Day, Gender, Grade, Language, NotificationSettings,
    Preacher, PreacherCategory, PreacherType, Role, SangatCount, SatsangBy, SatsangEntry,
    SatsangRecord, SatsangType, Settings, StartTime, StateName, TimeSlot, UserProfile,
    VehicleCounts, VehicleKind, Zone,
};
use crate::reports::{
    average_sangat_report, centre_listing_report, export_report, AverageSangatFilters,
    CentreListingFilters, CountRange, ExportFormat, ReportTable, AVERAGE_SANGAT_COLUMNS,
};
use crate::state::{NavEvent, Report};

use super::forms::{Field, Form, FormInput, NumberFormat};

pub(crate) const SAVED_SATSANG_MESSAGE: &str = "Satsang data saved successfully!";
pub(crate) const CANCELLED_SATSANG_MESSAGE: &str = "Satsang marked as cancelled";
pub(crate) const SAVED_SETTINGS_MESSAGE: &str = "Settings saved successfully!";
pub(crate) const BAAL_SUNDAY_NOTE: &str = "Baal Satsang is fixed for Sundays";

const MINUTE_OPTIONS: [&str; 4] = ["00", "15", "30", "45"];
pub(crate) const TAB_OPTIONS: [&str; 2] = ["Main Satsang Details", "Baal Satsang Details"];

/// Feedback a screen wants shown in the footer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Notice {
    Success(String),
    Warning(String),
}

/// Result of feeding a keystroke to a screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ScreenAction {
    Notice(Notice),
    Nav(NavEvent),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum EntryTab {
    Main,
    Baal,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum EntryField {
    Tab,
    MainDate,
    MainDay,
    MainHour,
    MainMinute,
    MainDurationHours,
    MainDurationMinutes,
    MainLanguage,
    MainPreacherType,
    MainSatsangBy,
    MainPreacherName,
    MainGrading,
    MainPathi,
    MainShabad,
    MainBani,
    MainGents,
    MainLadies,
    MainChildren,
    BaalDate,
    BaalHour,
    BaalMinute,
    BaalDuration,
    BaalLanguage,
    BaalPreacherType,
    BaalSatsangBy,
    BaalPreacherName,
    BaalGrading,
    BaalChildren,
    Vehicle(VehicleKind),
    Save,
    CancelSatsang,
    CancelReason,
}

impl EntryField {
    fn tab(self) -> Option<EntryTab> {
        use EntryField::*;
        match self {
            MainDate | MainDay | MainHour | MainMinute | MainDurationHours
            | MainDurationMinutes | MainLanguage | MainPreacherType | MainSatsangBy
            | MainPreacherName | MainGrading | MainPathi | MainShabad | MainBani | MainGents
            | MainLadies | MainChildren => Some(EntryTab::Main),
            BaalDate | BaalHour | BaalMinute | BaalDuration | BaalLanguage | BaalPreacherType
            | BaalSatsangBy | BaalPreacherName | BaalGrading | BaalChildren => Some(EntryTab::Baal),
            Tab | Vehicle(_) | Save | CancelSatsang | CancelReason => None,
        }
    }
}

/// The most recent Sunday on or before `date`.
fn last_sunday(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Main and Baal satsang tabs plus the shared vehicle section.
pub(crate) struct DataEntryScreen {
    pub(crate) form: Form<EntryField>,
    cancelling: bool,
}

impl DataEntryScreen {
    pub(crate) fn new(today: NaiveDate) -> Self {
        let mut form = Form::new()
            .field(Field::choice(EntryField::Tab, "Form", TAB_OPTIONS.to_vec()))
            .section("Main Satsang Details")
            .field(Field::date(EntryField::MainDate, "Date", today, today, 1))
            .field(Field::select::<Day>(EntryField::MainDay, "Day"))
            .field(
                Field::number(EntryField::MainHour, "Start Time - Hour", 0, 23, 0)
                    .format(NumberFormat::Padded),
            )
            .field(Field::choice(
                EntryField::MainMinute,
                "Start Time - Minute",
                MINUTE_OPTIONS.to_vec(),
            ))
            .field(Field::number(EntryField::MainDurationHours, "Duration - Hours", 0, 10, 1))
            .field(Field::number(EntryField::MainDurationMinutes, "Duration - Minutes", 0, 59, 30))
            .field(Field::select::<Language>(EntryField::MainLanguage, "Language"))
            .field(Field::select::<PreacherType>(EntryField::MainPreacherType, "Preacher Type"))
            .field(Field::select::<SatsangBy>(EntryField::MainSatsangBy, "Satsang By"))
            .field(Field::text(EntryField::MainPreacherName, "Preacher Name"))
            .field(Field::optional::<Grade>(EntryField::MainGrading, "Grading (Optional)"))
            .field(Field::text(EntryField::MainPathi, "Pathi Name"))
            .field(Field::text(EntryField::MainShabad, "Shabad Taken"))
            .field(Field::text(EntryField::MainBani, "Bani by"))
            .section("Sangat Count")
            .field(Field::count(EntryField::MainGents, "Gents"))
            .field(Field::count(EntryField::MainLadies, "Ladies"))
            .field(Field::count(EntryField::MainChildren, "Children"))
            .section("Baal Satsang Details")
            .field(Field::date(EntryField::BaalDate, "Date (Sunday)", last_sunday(today), today, 7))
            .field(
                Field::number(EntryField::BaalHour, "Start Time - Hour", 0, 23, 0)
                    .format(NumberFormat::Padded),
            )
            .field(Field::choice(
                EntryField::BaalMinute,
                "Start Time - Minute",
                MINUTE_OPTIONS.to_vec(),
            ))
            .field(
                Field::number(EntryField::BaalDuration, "Duration (hours)", 30, 240, 30)
                    .step(30)
                    .format(NumberFormat::Hours),
            )
            .field(Field::select::<Language>(EntryField::BaalLanguage, "Language"))
            .field(Field::select::<PreacherType>(EntryField::BaalPreacherType, "Preacher Type"))
            .field(Field::select::<SatsangBy>(EntryField::BaalSatsangBy, "Satsang By"))
            .field(Field::text(EntryField::BaalPreacherName, "Preacher Name"))
            .field(Field::optional::<Grade>(EntryField::BaalGrading, "Grading (Optional)"))
            .section("Sangat Count")
            .field(Field::count(EntryField::BaalChildren, "Children Count"))
            .section("Vehicle Details");
        for kind in VehicleKind::ALL {
            form = form.field(Field::count(EntryField::Vehicle(*kind), kind.label()));
        }
        let form = form
            .section("Actions")
            .field(Field::button(EntryField::Save, "Save Satsang"))
            .field(Field::button(EntryField::CancelSatsang, "Cancel Satsang"))
            .field(Field::text_with_placeholder(
                EntryField::CancelReason,
                "Reason for Cancellation",
                "<required to cancel>",
            ));

        let mut screen = Self {
            form,
            cancelling: false,
        };
        screen.sync();
        screen
    }

    pub(crate) fn active_tab(&self) -> EntryTab {
        if self.form.choice(EntryField::Tab) == TAB_OPTIONS[1] {
            EntryTab::Baal
        } else {
            EntryTab::Main
        }
    }

    pub(crate) fn is_cancelling(&self) -> bool {
        self.cancelling
    }

    /// Recompute which fields are shown and enabled.
    fn sync(&mut self) {
        let tab = self.active_tab();
        self.form
            .set_hidden_where(|key| key.tab().is_some_and(|owner| owner != tab), true);
        self.form
            .set_hidden_where(|key| key.tab() == Some(tab), false);

        for (owner, kind, by, name) in [
            (
                EntryTab::Main,
                EntryField::MainPreacherType,
                EntryField::MainSatsangBy,
                EntryField::MainPreacherName,
            ),
            (
                EntryTab::Baal,
                EntryField::BaalPreacherType,
                EntryField::BaalSatsangBy,
                EntryField::BaalPreacherName,
            ),
        ] {
            let cassette = self.form.selected::<PreacherType>(kind) == Some(PreacherType::Cassette);
            self.form.set_hidden(by, owner != tab || !cassette);
            self.form.set_disabled(name, cassette);
        }

        self.form
            .set_hidden(EntryField::CancelReason, !self.cancelling);
        self.form.ensure_focus();
    }

    pub(crate) fn handle(&mut self, input: FormInput) -> Option<ScreenAction> {
        let pressed = self.form.handle(input);
        self.sync();
        match pressed? {
            EntryField::Save => Some(ScreenAction::Notice(self.save())),
            EntryField::CancelSatsang if !self.cancelling => {
                self.cancelling = true;
                self.sync();
                self.form.focus(EntryField::CancelReason);
                None
            }
            EntryField::CancelSatsang | EntryField::CancelReason => {
                self.confirm_cancel().map(ScreenAction::Notice)
            }
            _ => None,
        }
    }

    /// Build the record for the active tab, then drop it. There is no store.
    fn save(&mut self) -> Notice {
        let entry = self.entry();
        log::info!("satsang entry for {} submitted and discarded", entry.date());
        log::debug!("{entry:?}");
        Notice::Success(SAVED_SATSANG_MESSAGE.to_string())
    }

    /// A blank reason is a silent no-op.
    fn confirm_cancel(&mut self) -> Option<Notice> {
        let reason = self.form.text(EntryField::CancelReason).trim().to_string();
        if reason.is_empty() {
            return None;
        }
        log::info!("satsang cancelled: {reason}");
        self.cancelling = false;
        self.form.set_text(EntryField::CancelReason, "");
        self.sync();
        self.form.focus(EntryField::CancelSatsang);
        Some(Notice::Warning(CANCELLED_SATSANG_MESSAGE.to_string()))
    }

    fn start_time(&self, hour: EntryField, minute: EntryField) -> StartTime {
        StartTime {
            hour: u8::try_from(self.form.number(hour)).unwrap_or_default(),
            minute: self.form.choice(minute).parse().unwrap_or_default(),
        }
    }

    fn preacher(&self, kind: EntryField, by: EntryField, name: EntryField) -> Preacher {
        let kind = self
            .form
            .selected::<PreacherType>(kind)
            .unwrap_or(PreacherType::SatsangKarta);
        let cassette = kind == PreacherType::Cassette;
        Preacher {
            kind,
            satsang_by: if cassette { self.form.selected(by) } else { None },
            name: if cassette {
                String::new()
            } else {
                self.form.text(name).trim().to_string()
            },
        }
    }

    fn vehicles(&self) -> VehicleCounts {
        let mut vehicles = VehicleCounts::default();
        for kind in VehicleKind::ALL {
            vehicles.set(*kind, self.form.number(EntryField::Vehicle(*kind)));
        }
        vehicles
    }

    /// Typed snapshot of the active tab.
    pub(crate) fn entry(&self) -> SatsangEntry {
        let form = &self.form;
        match self.active_tab() {
            EntryTab::Main => SatsangEntry::Main(SatsangRecord {
                date: form.date(EntryField::MainDate).unwrap_or_default(),
                day: form.selected(EntryField::MainDay).unwrap_or(Day::Monday),
                start: self.start_time(EntryField::MainHour, EntryField::MainMinute),
                duration_minutes: form.number(EntryField::MainDurationHours) * 60
                    + form.number(EntryField::MainDurationMinutes),
                language: form
                    .selected(EntryField::MainLanguage)
                    .unwrap_or(Language::English),
                preacher: self.preacher(
                    EntryField::MainPreacherType,
                    EntryField::MainSatsangBy,
                    EntryField::MainPreacherName,
                ),
                grading: form.selected(EntryField::MainGrading),
                pathi_name: form.text(EntryField::MainPathi).trim().to_string(),
                shabad_taken: form.text(EntryField::MainShabad).trim().to_string(),
                bani_by: form.text(EntryField::MainBani).trim().to_string(),
                sangat: SangatCount {
                    gents: form.number(EntryField::MainGents),
                    ladies: form.number(EntryField::MainLadies),
                    children: form.number(EntryField::MainChildren),
                },
                vehicles: self.vehicles(),
            }),
            EntryTab::Baal => SatsangEntry::Baal(BaalSatsangRecord {
                date: form.date(EntryField::BaalDate).unwrap_or_default(),
                start: self.start_time(EntryField::BaalHour, EntryField::BaalMinute),
                duration_minutes: form.number(EntryField::BaalDuration),
                language: form
                    .selected(EntryField::BaalLanguage)
                    .unwrap_or(Language::English),
                preacher: self.preacher(
                    EntryField::BaalPreacherType,
                    EntryField::BaalSatsangBy,
                    EntryField::BaalPreacherName,
                ),
                grading: form.selected(EntryField::BaalGrading),
                children: form.number(EntryField::BaalChildren),
                vehicles: self.vehicles(),
            }),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum SettingsField {
    FullName,
    Email,
    Role,
    Phone,
    Location,
    Zone,
    EmailNotifications,
    SmsNotifications,
    ReportAlerts,
    Save,
}

pub(crate) struct SettingsScreen {
    pub(crate) form: Form<SettingsField>,
}

impl SettingsScreen {
    pub(crate) fn new() -> Self {
        let form = Form::new()
            .section("User Profile")
            .field(Field::text(SettingsField::FullName, "Full Name"))
            .field(Field::text(SettingsField::Email, "Email"))
            .field(Field::select::<Role>(SettingsField::Role, "Role"))
            .field(Field::text(SettingsField::Phone, "Phone Number"))
            .field(Field::text(SettingsField::Location, "Location"))
            .field(Field::select::<Zone>(SettingsField::Zone, "Zone"))
            .section("Notification Settings")
            .field(Field::checkbox(SettingsField::EmailNotifications, "Email Notifications"))
            .field(Field::checkbox(SettingsField::SmsNotifications, "SMS Notifications"))
            .field(Field::checkbox(SettingsField::ReportAlerts, "Report Generation Alerts"))
            .section("")
            .field(Field::button(SettingsField::Save, "Save Settings"));
        Self { form }
    }

    pub(crate) fn settings(&self) -> Settings {
        let form = &self.form;
        Settings {
            profile: UserProfile {
                full_name: form.text(SettingsField::FullName).trim().to_string(),
                email: form.text(SettingsField::Email).trim().to_string(),
                role: form.selected(SettingsField::Role).unwrap_or(Role::Organizer),
                phone: form.text(SettingsField::Phone).trim().to_string(),
                location: form.text(SettingsField::Location).trim().to_string(),
                zone: form.selected(SettingsField::Zone).unwrap_or(Zone::Zone2),
            },
            notifications: NotificationSettings {
                email: form.checked(SettingsField::EmailNotifications),
                sms: form.checked(SettingsField::SmsNotifications),
                report_alerts: form.checked(SettingsField::ReportAlerts),
            },
        }
    }

    pub(crate) fn handle(&mut self, input: FormInput) -> Option<ScreenAction> {
        match self.form.handle(input)? {
            SettingsField::Save => {
                let settings = self.settings();
                log::info!("settings submitted for role {}", settings.profile.role);
                log::debug!("{settings:?}");
                Some(ScreenAction::Notice(Notice::Success(
                    SAVED_SETTINGS_MESSAGE.to_string(),
                )))
            }
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ReportField {
    ToggleFilters,
    Year,
    SatsangType,
    Language,
    TimeSlot,
    Zone,
    State,
    Area,
    Day,
    PreacherType,
    CentreName,
    CentreType,
    PreacherGender,
    PreacherGrade,
    PreacherName,
    MaleMin,
    MaleMax,
    FemaleMin,
    FemaleMax,
    ChildrenMin,
    ChildrenMax,
    Generate,
    ExportExcel,
    ExportPdf,
}

impl ReportField {
    fn is_filter(self) -> bool {
        !matches!(
            self,
            ReportField::ToggleFilters
                | ReportField::Generate
                | ReportField::ExportExcel
                | ReportField::ExportPdf
        )
    }
}

/// Filter panel, action buttons, and the last generated table for one report.
pub(crate) struct ReportScreen {
    pub(crate) report: Report,
    pub(crate) form: Form<ReportField>,
    pub(crate) table: ReportTable,
}

impl ReportScreen {
    pub(crate) fn new(report: Report, years: RangeInclusive<u32>) -> Self {
        let form = Form::new().field(Field::button(ReportField::ToggleFilters, "Advanced Filters"));
        let (form, table) = match report {
            Report::AverageSangat => (
                Self::average_sangat_filters(form, years),
                ReportTable::empty(&AVERAGE_SANGAT_COLUMNS),
            ),
            Report::CentreListing => (
                Self::centre_listing_filters(form),
                centre_listing_report(&CentreListingFilters::default()),
            ),
        };
        let form = form
            .section("")
            .field(Field::button(ReportField::Generate, "Generate Report"))
            .field(Field::button(ReportField::ExportExcel, "Export to Excel"))
            .field(Field::button(ReportField::ExportPdf, "Export to PDF"));

        let mut screen = Self {
            report,
            form,
            table,
        };
        screen.set_filters_visible(false);
        screen
    }

    fn average_sangat_filters(
        form: Form<ReportField>,
        years: RangeInclusive<u32>,
    ) -> Form<ReportField> {
        form.section("Advanced Filters")
            .field(Field::number(
                ReportField::Year,
                "Year",
                *years.start(),
                *years.end(),
                *years.start(),
            ))
            .field(Field::select::<SatsangType>(ReportField::SatsangType, "Satsang Type"))
            .field(Field::filter(ReportField::Language, "Language", Language::ALL))
            .field(Field::filter(ReportField::TimeSlot, "Time Slot", TimeSlot::ALL))
            .field(Field::filter(ReportField::Zone, "Zone", Zone::ALL))
            .field(Field::filter(ReportField::State, "State", StateName::ALL))
            .field(Field::filter(ReportField::Area, "Area", Area::ALL))
            .field(Field::filter(ReportField::Day, "Day of Week", &Day::SUNDAY_FIRST))
            .field(Field::filter(
                ReportField::PreacherType,
                "Preacher Type",
                &[
                    PreacherCategory::Sk,
                    PreacherCategory::Sr,
                    PreacherCategory::Cassette,
                ],
            ))
    }

    fn centre_listing_filters(form: Form<ReportField>) -> Form<ReportField> {
        form.section("Geographic Filters")
            .field(Field::filter(ReportField::Zone, "Zone", Zone::ALL))
            .field(Field::filter(ReportField::State, "State", StateName::ALL))
            .field(Field::filter(ReportField::Area, "Area", Area::ALL))
            .field(Field::text_with_placeholder(
                ReportField::CentreName,
                "Name of Centre",
                "Enter centre name...",
            ))
            .section("Satsang Info Filters")
            .field(Field::filter(ReportField::CentreType, "Centre Type", CentreType::ALL))
            .field(Field::filter(ReportField::SatsangType, "Satsang Type", SatsangType::ALL))
            .field(Field::filter(ReportField::Language, "Language", Language::ALL))
            .field(Field::filter(ReportField::Day, "Day of Week", &Day::SUNDAY_FIRST))
            .field(Field::filter(ReportField::TimeSlot, "Time Slot", TimeSlot::ALL))
            .field(Field::filter(
                ReportField::PreacherType,
                "Preacher Type",
                PreacherCategory::ALL,
            ))
            .field(Field::filter(ReportField::PreacherGender, "Preacher Gender", Gender::ALL))
            .field(Field::filter(ReportField::PreacherGrade, "Preacher Grade", Grade::ALL))
            .field(Field::text(ReportField::PreacherName, "Preacher Name"))
            .section("Sangat Count Ranges")
            .field(Self::range_bound(ReportField::MaleMin, "Minimum Male Count", 0))
            .field(Self::range_bound(ReportField::MaleMax, "Maximum Male Count", 1000))
            .field(Self::range_bound(ReportField::FemaleMin, "Minimum Female Count", 0))
            .field(Self::range_bound(ReportField::FemaleMax, "Maximum Female Count", 1000))
            .field(Self::range_bound(ReportField::ChildrenMin, "Minimum Children Count", 0))
            .field(Self::range_bound(ReportField::ChildrenMax, "Maximum Children Count", 1000))
    }

    fn range_bound(key: ReportField, label: &'static str, value: u32) -> Field<ReportField> {
        Field::number(key, label, 0, u32::MAX, value)
    }

    /// Mirror the shared filters-visible flag onto this screen's panel.
    pub(crate) fn set_filters_visible(&mut self, visible: bool) {
        self.form.set_hidden_where(ReportField::is_filter, !visible);
        self.form.ensure_focus();
    }

    pub(crate) fn average_filters(&self) -> AverageSangatFilters {
        let form = &self.form;
        AverageSangatFilters {
            year: form.number(ReportField::Year),
            satsang_type: form
                .selected(ReportField::SatsangType)
                .unwrap_or(SatsangType::Main),
            language: form.selected(ReportField::Language),
            time_slot: form.selected(ReportField::TimeSlot),
            zone: form.selected(ReportField::Zone),
            state: form.selected(ReportField::State),
            area: form.selected(ReportField::Area),
            day: form.selected(ReportField::Day),
            preacher_type: form.selected(ReportField::PreacherType),
        }
    }

    pub(crate) fn centre_filters(&self) -> CentreListingFilters {
        let form = &self.form;
        let range = |min, max| CountRange {
            min: form.number(min),
            max: form.number(max),
        };
        CentreListingFilters {
            zone: form.selected(ReportField::Zone),
            state: form.selected(ReportField::State),
            area: form.selected(ReportField::Area),
            centre_name: form.text(ReportField::CentreName).trim().to_string(),
            centre_type: form.selected(ReportField::CentreType),
            satsang_type: form.selected(ReportField::SatsangType),
            language: form.selected(ReportField::Language),
            day: form.selected(ReportField::Day),
            time_slot: form.selected(ReportField::TimeSlot),
            preacher_type: form.selected(ReportField::PreacherType),
            preacher_gender: form.selected(ReportField::PreacherGender),
            preacher_grade: form.selected(ReportField::PreacherGrade),
            preacher_name: form.text(ReportField::PreacherName).trim().to_string(),
            male: range(ReportField::MaleMin, ReportField::MaleMax),
            female: range(ReportField::FemaleMin, ReportField::FemaleMax),
            children: range(ReportField::ChildrenMin, ReportField::ChildrenMax),
        }
    }

    pub(crate) fn generate(&mut self) {
        self.table = match self.report {
            Report::AverageSangat => average_sangat_report(&self.average_filters()),
            Report::CentreListing => centre_listing_report(&self.centre_filters()),
        };
        log::info!("{} generated with {} rows", self.report, self.table.len());
    }

    fn export(&self, format: ExportFormat) -> ScreenAction {
        ScreenAction::Notice(Notice::Success(export_report(&self.table, format)))
    }

    /// Forget a generated Average Sangat table. Centre Listing always shows
    /// its rows.
    pub(crate) fn reset(&mut self) {
        if self.report == Report::AverageSangat && !self.table.is_empty() {
            log::debug!("{} cleared", self.report);
            self.table = ReportTable::empty(&AVERAGE_SANGAT_COLUMNS);
        }
    }

    pub(crate) fn handle(&mut self, input: FormInput) -> Option<ScreenAction> {
        let edits_filter = !matches!(
            input,
            FormInput::Next | FormInput::Previous | FormInput::Activate
        ) && self.form.focused_key().is_some_and(ReportField::is_filter);
        let pressed = self.form.handle(input);
        if edits_filter {
            self.reset();
        }
        match pressed? {
            ReportField::ToggleFilters => {
                self.reset();
                Some(ScreenAction::Nav(NavEvent::ToggleFilters))
            }
            ReportField::Generate => {
                self.generate();
                None
            }
            ReportField::ExportExcel => Some(self.export(ExportFormat::Excel)),
            ReportField::ExportPdf => Some(self.export(ExportFormat::Pdf)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        // A Wednesday.
        NaiveDate::from_ymd_opt(2024, 6, 12).unwrap()
    }

    fn press(screen: &mut DataEntryScreen, key: EntryField) -> Option<ScreenAction> {
        screen.form.focus(key);
        screen.handle(FormInput::Activate)
    }

    fn type_text(screen: &mut DataEntryScreen, key: EntryField, text: &str) {
        screen.form.focus(key);
        for ch in text.chars() {
            screen.handle(FormInput::Char(ch));
        }
    }

    #[test]
    fn baal_date_defaults_to_previous_sunday() {
        let screen = DataEntryScreen::new(today());
        assert_eq!(
            screen.form.date(EntryField::BaalDate),
            NaiveDate::from_ymd_opt(2024, 6, 9)
        );
        assert_eq!(screen.form.date(EntryField::MainDate), Some(today()));
    }

    #[test]
    fn switching_tabs_swaps_visible_fields() {
        let mut screen = DataEntryScreen::new(today());
        assert!(screen.form.is_hidden(EntryField::BaalChildren));
        assert!(!screen.form.is_hidden(EntryField::MainGents));

        screen.form.focus(EntryField::Tab);
        screen.handle(FormInput::Increase);
        assert_eq!(screen.active_tab(), EntryTab::Baal);
        assert!(!screen.form.is_hidden(EntryField::BaalChildren));
        assert!(screen.form.is_hidden(EntryField::MainGents));
        assert!(!screen.form.is_hidden(EntryField::Vehicle(VehicleKind::Bus)));
    }

    #[test]
    fn cassette_reveals_satsang_by_and_disables_name() {
        let mut screen = DataEntryScreen::new(today());
        type_text(&mut screen, EntryField::MainPreacherName, "Sant");
        assert!(screen.form.is_hidden(EntryField::MainSatsangBy));

        screen.form.focus(EntryField::MainPreacherType);
        screen.handle(FormInput::Decrease);
        assert!(!screen.form.is_hidden(EntryField::MainSatsangBy));
        assert!(screen.form.is_disabled(EntryField::MainPreacherName));

        let SatsangEntry::Main(record) = screen.entry() else {
            panic!("expected a main satsang entry");
        };
        assert_eq!(record.preacher.kind, PreacherType::Cassette);
        assert_eq!(record.preacher.satsang_by, Some(SatsangBy::HuzurMaharajJi));
        assert!(record.preacher.name.is_empty());
    }

    #[test]
    fn main_entry_collects_typed_values() {
        let mut screen = DataEntryScreen::new(today());
        type_text(&mut screen, EntryField::MainGents, "120");
        type_text(&mut screen, EntryField::MainLadies, "95");
        type_text(&mut screen, EntryField::Vehicle(VehicleKind::Car), "7");
        type_text(&mut screen, EntryField::MainPreacherName, " Sant Das ");
        screen.form.focus(EntryField::MainMinute);
        screen.handle(FormInput::Increase);
        screen.handle(FormInput::Increase);

        let SatsangEntry::Main(record) = screen.entry() else {
            panic!("expected a main satsang entry");
        };
        assert_eq!(record.sangat.total(), 215);
        assert_eq!(record.vehicles.get(VehicleKind::Car), 7);
        assert_eq!(record.preacher.name, "Sant Das");
        assert_eq!(record.start, StartTime { hour: 0, minute: 30 });
        assert_eq!(record.duration_minutes, 90);
        assert_eq!(record.grading, None);
    }

    #[test]
    fn baal_entry_uses_half_hour_duration() {
        let mut screen = DataEntryScreen::new(today());
        screen.form.focus(EntryField::Tab);
        screen.handle(FormInput::Increase);
        screen.form.focus(EntryField::BaalDuration);
        screen.handle(FormInput::Increase);
        screen.form.focus(EntryField::BaalDate);
        screen.handle(FormInput::Increase);

        let SatsangEntry::Baal(record) = screen.entry() else {
            panic!("expected a baal satsang entry");
        };
        assert_eq!(record.duration_minutes, 60);
        // The next Sunday is after today, so the date stays put.
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 6, 9).unwrap());
    }

    #[test]
    fn save_reports_success_without_keeping_the_record() {
        let mut screen = DataEntryScreen::new(today());
        type_text(&mut screen, EntryField::MainGents, "40");
        let action = press(&mut screen, EntryField::Save);
        assert_eq!(
            action,
            Some(ScreenAction::Notice(Notice::Success(
                SAVED_SATSANG_MESSAGE.to_string()
            )))
        );
    }

    #[test]
    fn cancel_requires_a_reason() {
        let mut screen = DataEntryScreen::new(today());
        assert!(screen.form.is_hidden(EntryField::CancelReason));

        assert_eq!(press(&mut screen, EntryField::CancelSatsang), None);
        assert!(screen.is_cancelling());
        assert_eq!(screen.form.focused_key(), Some(EntryField::CancelReason));

        assert_eq!(screen.handle(FormInput::Activate), None);
        assert!(screen.is_cancelling());

        type_text(&mut screen, EntryField::CancelReason, "Rain");
        assert_eq!(
            screen.handle(FormInput::Activate),
            Some(ScreenAction::Notice(Notice::Warning(
                CANCELLED_SATSANG_MESSAGE.to_string()
            )))
        );
        assert!(!screen.is_cancelling());
        assert!(screen.form.is_hidden(EntryField::CancelReason));
    }

    #[test]
    fn settings_save_reads_back_typed_values() {
        let mut screen = SettingsScreen::new();
        for ch in "Asha".chars() {
            screen.handle(FormInput::Char(ch));
        }
        screen.form.focus(SettingsField::Role);
        screen.handle(FormInput::Increase);
        screen.form.focus(SettingsField::SmsNotifications);
        screen.handle(FormInput::Char(' '));

        let settings = screen.settings();
        assert_eq!(settings.profile.full_name, "Asha");
        assert_eq!(settings.profile.role, Role::ZonalStaff);
        assert!(settings.notifications.sms);
        assert!(!settings.notifications.email);

        screen.form.focus(SettingsField::Save);
        assert_eq!(
            screen.handle(FormInput::Activate),
            Some(ScreenAction::Notice(Notice::Success(
                SAVED_SETTINGS_MESSAGE.to_string()
            )))
        );
    }

    #[test]
    fn average_report_is_empty_until_generated() {
        let mut screen = ReportScreen::new(Report::AverageSangat, 2020..=2025);
        assert!(screen.table.is_empty());
        screen.form.focus(ReportField::Generate);
        assert_eq!(screen.handle(FormInput::Activate), None);
        assert_eq!(screen.table.len(), 3);
    }

    #[test]
    fn editing_a_filter_drops_generated_rows() {
        let mut screen = ReportScreen::new(Report::AverageSangat, 2020..=2025);
        screen.set_filters_visible(true);
        screen.generate();
        assert_eq!(screen.table.len(), 3);

        // Moving between fields keeps the table.
        screen.form.focus(ReportField::Year);
        screen.handle(FormInput::Next);
        assert_eq!(screen.table.len(), 3);

        screen.form.focus(ReportField::Year);
        screen.handle(FormInput::Increase);
        assert!(screen.table.is_empty());
    }

    #[test]
    fn toggling_filters_drops_generated_rows() {
        let mut screen = ReportScreen::new(Report::AverageSangat, 2020..=2025);
        screen.generate();
        screen.form.focus(ReportField::ToggleFilters);
        screen.handle(FormInput::Activate);
        assert!(screen.table.is_empty());
    }

    #[test]
    fn centre_listing_keeps_rows_on_reset() {
        let mut screen = ReportScreen::new(Report::CentreListing, 2020..=2025);
        screen.reset();
        assert_eq!(screen.table.len(), 3);
    }

    #[test]
    fn filter_panel_follows_visibility_flag() {
        let mut screen = ReportScreen::new(Report::CentreListing, 2020..=2025);
        assert!(screen.form.is_hidden(ReportField::Zone));
        assert!(!screen.form.is_hidden(ReportField::Generate));

        screen.set_filters_visible(true);
        assert!(!screen.form.is_hidden(ReportField::Zone));
        assert!(!screen.form.is_hidden(ReportField::ChildrenMax));
    }

    #[test]
    fn toggle_button_emits_navigation_event() {
        let mut screen = ReportScreen::new(Report::AverageSangat, 2020..=2025);
        assert_eq!(screen.form.focused_key(), Some(ReportField::ToggleFilters));
        assert_eq!(
            screen.handle(FormInput::Activate),
            Some(ScreenAction::Nav(NavEvent::ToggleFilters))
        );
    }

    #[test]
    fn average_filters_read_back_from_form() {
        let mut screen = ReportScreen::new(Report::AverageSangat, 2021..=2024);
        screen.set_filters_visible(true);
        screen.form.focus(ReportField::Year);
        screen.handle(FormInput::Increase);
        screen.form.select_label(ReportField::Day, "Sunday");

        let filters = screen.average_filters();
        assert_eq!(filters.year, 2022);
        assert_eq!(filters.day, Some(Day::Sunday));
        assert_eq!(filters.zone, None);
    }

    #[test]
    fn export_buttons_only_acknowledge() {
        let mut screen = ReportScreen::new(Report::CentreListing, 2020..=2025);
        screen.form.focus(ReportField::ExportPdf);
        assert_eq!(
            screen.handle(FormInput::Activate),
            Some(ScreenAction::Notice(Notice::Success(
                "Report exported to PDF!".to_string()
            )))
        );
    }
}
