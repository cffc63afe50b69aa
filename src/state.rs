//! Navigation state for a single session. The sidebar, the report sub-menu
//! and the "Advanced Filters" toggle all funnel through [`NavigationState`],
//! which is the only piece of the application that decides which view is
//! rendered. Key handling never touches the flags directly; it produces a
//! [`NavEvent`] and hands it to [`NavigationState::apply`].

use std::fmt;

/// Top-level pages reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    DataEntry,
    Reports,
    Settings,
}

impl Page {
    /// Sidebar order.
    pub const ALL: [Page; 3] = [Page::DataEntry, Page::Reports, Page::Settings];

    pub fn title(self) -> &'static str {
        match self {
            Page::DataEntry => "Data Entry",
            Page::Reports => "Reports",
            Page::Settings => "Settings",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Reports listed underneath the Reports page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    AverageSangat,
    CentreListing,
}

impl Report {
    pub const ALL: [Report; 2] = [Report::AverageSangat, Report::CentreListing];

    pub fn title(self) -> &'static str {
        match self {
            Report::AverageSangat => "Average Sangat Report",
            Report::CentreListing => "Centre Listing Report",
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Discrete navigation commands produced by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    SelectPage(Page),
    SelectReport(Report),
    ToggleFilters,
}

/// What the content pane should show for a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    DataEntryForm,
    AverageSangatReport,
    CentreListingReport,
    SelectReportPlaceholder,
    SettingsForm,
}

/// Page, report and filter-panel flags for one session.
///
/// Fields are private so `current_report` can only be set while the Reports
/// page is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    current_page: Page,
    current_report: Option<Report>,
    filters_visible: bool,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_page(&self) -> Page {
        self.current_page
    }

    pub fn current_report(&self) -> Option<Report> {
        self.current_report
    }

    pub fn filters_visible(&self) -> bool {
        self.filters_visible
    }

    /// Apply a navigation event. This is the single transition function used
    /// by the front-end.
    pub fn apply(&mut self, event: NavEvent) {
        match event {
            NavEvent::SelectPage(page) => self.select_page(page),
            NavEvent::SelectReport(report) => self.select_report(report),
            NavEvent::ToggleFilters => self.toggle_filters(),
        }
    }

    /// Switch pages. Leaving the Reports page forgets the selected report.
    pub fn select_page(&mut self, page: Page) {
        self.current_page = page;
        if page != Page::Reports {
            self.current_report = None;
        }
    }

    /// Select a report. Ignored unless the Reports page is active.
    pub fn select_report(&mut self, report: Report) {
        if self.current_page == Page::Reports {
            self.current_report = Some(report);
        } else {
            log::debug!("ignoring report selection {report} outside the Reports page");
        }
    }

    pub fn toggle_filters(&mut self) {
        self.filters_visible = !self.filters_visible;
    }

    /// Pure render dispatch.
    pub fn view(&self) -> View {
        match (self.current_page, self.current_report) {
            (Page::DataEntry, _) => View::DataEntryForm,
            (Page::Reports, Some(Report::AverageSangat)) => View::AverageSangatReport,
            (Page::Reports, Some(Report::CentreListing)) => View::CentreListingReport,
            (Page::Reports, None) => View::SelectReportPlaceholder,
            (Page::Settings, _) => View::SettingsForm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_data_entry() {
        let state = NavigationState::new();
        assert_eq!(state.current_page(), Page::DataEntry);
        assert_eq!(state.current_report(), None);
        assert!(!state.filters_visible());
        assert_eq!(state.view(), View::DataEntryForm);
    }

    #[test]
    fn leaving_reports_clears_report() {
        let mut state = NavigationState::new();
        state.select_page(Page::Reports);
        state.select_report(Report::CentreListing);
        assert_eq!(state.view(), View::CentreListingReport);

        state.select_page(Page::Settings);
        assert_eq!(state.current_report(), None);
        assert_eq!(state.view(), View::SettingsForm);
    }

    #[test]
    fn reselecting_reports_keeps_report() {
        let mut state = NavigationState::new();
        state.apply(NavEvent::SelectPage(Page::Reports));
        state.apply(NavEvent::SelectReport(Report::AverageSangat));
        state.apply(NavEvent::SelectPage(Page::Reports));
        assert_eq!(state.current_report(), Some(Report::AverageSangat));
    }

    #[test]
    fn report_selection_outside_reports_is_ignored() {
        let mut state = NavigationState::new();
        state.apply(NavEvent::SelectReport(Report::AverageSangat));
        assert_eq!(state.current_page(), Page::DataEntry);
        assert_eq!(state.current_report(), None);
    }

    #[test]
    fn reports_without_selection_shows_placeholder() {
        let mut state = NavigationState::new();
        state.apply(NavEvent::SelectPage(Page::Reports));
        assert_eq!(state.view(), View::SelectReportPlaceholder);
    }

    #[test]
    fn filters_flag_survives_page_changes() {
        let mut state = NavigationState::new();
        state.apply(NavEvent::ToggleFilters);
        state.apply(NavEvent::SelectPage(Page::Settings));
        assert!(state.filters_visible());
    }
}
