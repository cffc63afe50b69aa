use chrono::{Days, NaiveDate};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::Choice;

/// Option label used by report filters for "no restriction".
pub(crate) const ALL_OPTION: &str = "All";

/// How a number field renders its value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum NumberFormat {
    Plain,
    /// Two digits, for hours of the day.
    Padded,
    /// Value holds minutes, shown as decimal hours.
    Hours,
}

#[derive(Clone, Debug)]
pub(crate) enum FieldKind {
    Text {
        value: String,
        placeholder: &'static str,
    },
    Number {
        value: u32,
        min: u32,
        max: u32,
        step: u32,
        format: NumberFormat,
    },
    Choice {
        options: Vec<&'static str>,
        selected: usize,
    },
    Date {
        value: NaiveDate,
        max: NaiveDate,
        step_days: u64,
    },
    Checkbox(bool),
    Button,
}

/// One focusable row of a form.
#[derive(Clone, Debug)]
pub(crate) struct Field<K> {
    pub(crate) key: K,
    pub(crate) label: &'static str,
    pub(crate) section: &'static str,
    pub(crate) kind: FieldKind,
    pub(crate) hidden: bool,
    pub(crate) disabled: bool,
}

impl<K> Field<K> {
    fn new(key: K, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            section: "",
            kind,
            hidden: false,
            disabled: false,
        }
    }

    pub(crate) fn text(key: K, label: &'static str) -> Self {
        Self::new(
            key,
            label,
            FieldKind::Text {
                value: String::new(),
                placeholder: "<optional>",
            },
        )
    }

    /// Free-text field with a custom placeholder.
    pub(crate) fn text_with_placeholder(key: K, label: &'static str, placeholder: &'static str) -> Self {
        Self::new(
            key,
            label,
            FieldKind::Text {
                value: String::new(),
                placeholder,
            },
        )
    }

    /// Integer field clamped to `[min, max]`, starting at `value`.
    pub(crate) fn number(key: K, label: &'static str, min: u32, max: u32, value: u32) -> Self {
        Self::new(
            key,
            label,
            FieldKind::Number {
                value: value.clamp(min, max),
                min,
                max,
                step: 1,
                format: NumberFormat::Plain,
            },
        )
    }

    /// Non-negative count with no practical upper bound.
    pub(crate) fn count(key: K, label: &'static str) -> Self {
        Self::number(key, label, 0, u32::MAX, 0)
    }

    pub(crate) fn step(mut self, step: u32) -> Self {
        if let FieldKind::Number { step: current, .. } = &mut self.kind {
            *current = step.max(1);
        }
        self
    }

    pub(crate) fn format(mut self, format: NumberFormat) -> Self {
        if let FieldKind::Number { format: current, .. } = &mut self.kind {
            *current = format;
        }
        self
    }

    pub(crate) fn choice(key: K, label: &'static str, options: Vec<&'static str>) -> Self {
        Self::new(
            key,
            label,
            FieldKind::Choice {
                options,
                selected: 0,
            },
        )
    }

    /// Selector over every value of `T`.
    pub(crate) fn select<T: Choice>(key: K, label: &'static str) -> Self {
        Self::choice(key, label, T::labels())
    }

    /// Selector over `options` with a leading "All" entry.
    pub(crate) fn filter<T: Choice>(key: K, label: &'static str, options: &[T]) -> Self {
        let mut labels = vec![ALL_OPTION];
        labels.extend(options.iter().map(|option| option.label()));
        Self::choice(key, label, labels)
    }

    /// Selector over `T` with a leading blank entry for "not set".
    pub(crate) fn optional<T: Choice>(key: K, label: &'static str) -> Self {
        let mut labels = vec![""];
        labels.extend(T::labels());
        Self::choice(key, label, labels)
    }

    /// Date field that never goes past `max`, moving `step_days` per keypress.
    pub(crate) fn date(key: K, label: &'static str, value: NaiveDate, max: NaiveDate, step_days: u64) -> Self {
        Self::new(
            key,
            label,
            FieldKind::Date {
                value: value.min(max),
                max,
                step_days: step_days.max(1),
            },
        )
    }

    pub(crate) fn checkbox(key: K, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Checkbox(false))
    }

    pub(crate) fn button(key: K, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Button)
    }

    fn focusable(&self) -> bool {
        !self.hidden && !self.disabled
    }

    /// Apply one keystroke. Returns true when the key was an activation of a
    /// button or a text field.
    fn apply(&mut self, input: FormInput) -> bool {
        if self.disabled {
            return false;
        }
        match (&mut self.kind, input) {
            (FieldKind::Button, FormInput::Activate) => return true,
            (FieldKind::Text { .. }, FormInput::Activate) => return true,
            (FieldKind::Text { value, .. }, FormInput::Char(ch)) => {
                if !ch.is_control() {
                    value.push(ch);
                }
            }
            (FieldKind::Text { value, .. }, FormInput::Backspace) => {
                value.pop();
            }
            (
                FieldKind::Number {
                    value,
                    min,
                    max,
                    step,
                    ..
                },
                input,
            ) => match input {
                FormInput::Increase => *value = value.saturating_add(*step).min(*max),
                FormInput::Decrease => *value = value.saturating_sub(*step).max(*min),
                FormInput::Char(ch) if *step == 1 => {
                    if let Some(digit) = ch.to_digit(10) {
                        *value = value
                            .saturating_mul(10)
                            .saturating_add(digit)
                            .clamp(*min, *max);
                    }
                }
                FormInput::Backspace if *step == 1 => *value = (*value / 10).clamp(*min, *max),
                _ => {}
            },
            (FieldKind::Choice { options, selected }, input) if !options.is_empty() => {
                match input {
                    FormInput::Increase => *selected = (*selected + 1) % options.len(),
                    FormInput::Decrease => {
                        *selected = (*selected + options.len() - 1) % options.len()
                    }
                    _ => {}
                }
            }
            (
                FieldKind::Date {
                    value,
                    max,
                    step_days,
                },
                input,
            ) => {
                let moved = match input {
                    FormInput::Increase => value.checked_add_days(Days::new(*step_days)),
                    FormInput::Decrease => value.checked_sub_days(Days::new(*step_days)),
                    _ => None,
                };
                if let Some(date) = moved.filter(|date| *date <= *max) {
                    *value = date;
                }
            }
            (FieldKind::Checkbox(checked), FormInput::Char(' ') | FormInput::Activate) => {
                *checked = !*checked;
            }
            _ => {}
        }
        false
    }

    fn display_value(&self) -> String {
        match &self.kind {
            FieldKind::Text { value, placeholder } => {
                if self.disabled {
                    "<disabled>".to_string()
                } else if value.is_empty() {
                    placeholder.to_string()
                } else {
                    value.clone()
                }
            }
            FieldKind::Number { value, format, .. } => match format {
                NumberFormat::Plain => value.to_string(),
                NumberFormat::Padded => format!("{value:02}"),
                NumberFormat::Hours => format!("{:.1}", f64::from(*value) / 60.0),
            },
            FieldKind::Choice { options, selected } => {
                let label = options.get(*selected).copied().unwrap_or_default();
                if label.is_empty() {
                    "< - >".to_string()
                } else {
                    format!("< {label} >")
                }
            }
            FieldKind::Date { value, .. } => value.format("%Y/%m/%d (%a)").to_string(),
            FieldKind::Checkbox(_) | FieldKind::Button => String::new(),
        }
    }

    /// Render the field as one styled line.
    pub(crate) fn build_line(&self, is_active: bool) -> Line<'static> {
        let active_style = Style::default().fg(Color::Yellow);
        match &self.kind {
            FieldKind::Button => {
                let style = if is_active {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                Line::from(Span::styled(format!("[ {} ]", self.label), style))
            }
            FieldKind::Checkbox(checked) => {
                let mark = if *checked { "[x]" } else { "[ ]" };
                let style = if is_active { active_style } else { Style::default() };
                Line::from(Span::styled(format!("{mark} {}", self.label), style))
            }
            FieldKind::Text { value, .. } => {
                let style = if self.disabled || (value.is_empty() && !is_active) {
                    Style::default().fg(Color::DarkGray)
                } else if is_active {
                    active_style
                } else {
                    Style::default()
                };
                let mut spans = vec![Span::raw(format!("{}: ", self.label))];
                if is_active && value.is_empty() {
                    spans.push(Span::styled(" ", Style::default().bg(Color::Yellow)));
                } else {
                    spans.push(Span::styled(self.display_value(), style));
                    if is_active {
                        spans.push(Span::styled(" ", Style::default().bg(Color::Yellow)));
                    }
                }
                Line::from(spans)
            }
            _ => {
                let style = if is_active { active_style } else { Style::default() };
                Line::from(vec![
                    Span::raw(format!("{}: ", self.label)),
                    Span::styled(self.display_value(), style),
                ])
            }
        }
    }
}

/// Keystrokes a form understands, already decoded from crossterm key codes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum FormInput {
    Next,
    Previous,
    Increase,
    Decrease,
    Char(char),
    Backspace,
    Activate,
}

/// Ordered list of fields with a single focus cursor.
#[derive(Clone, Debug)]
pub(crate) struct Form<K> {
    fields: Vec<Field<K>>,
    focus: usize,
    next_section: &'static str,
}

impl<K: Copy + PartialEq> Form<K> {
    pub(crate) fn new() -> Self {
        Self {
            fields: Vec::new(),
            focus: 0,
            next_section: "",
        }
    }

    /// Fields added after this call are grouped under `name`.
    pub(crate) fn section(mut self, name: &'static str) -> Self {
        self.next_section = name;
        self
    }

    pub(crate) fn field(mut self, mut field: Field<K>) -> Self {
        field.section = self.next_section;
        self.fields.push(field);
        self
    }

    pub(crate) fn visible_fields(&self) -> impl Iterator<Item = &Field<K>> {
        self.fields.iter().filter(|field| !field.hidden)
    }

    pub(crate) fn focused(&self) -> Option<&Field<K>> {
        self.fields.get(self.focus).filter(|field| field.focusable())
    }

    pub(crate) fn focused_key(&self) -> Option<K> {
        self.focused().map(|field| field.key)
    }

    pub(crate) fn has_focusable(&self) -> bool {
        self.fields.iter().any(Field::focusable)
    }

    /// Move focus onto `key` if that field can take it.
    pub(crate) fn focus(&mut self, key: K) {
        if let Some(idx) = self
            .fields
            .iter()
            .position(|field| field.key == key && field.focusable())
        {
            self.focus = idx;
        }
    }

    pub(crate) fn focus_next(&mut self) {
        self.step_focus(1);
    }

    pub(crate) fn focus_previous(&mut self) {
        self.step_focus(-1);
    }

    fn step_focus(&mut self, direction: isize) {
        let len = self.fields.len() as isize;
        if len == 0 {
            return;
        }
        let mut idx = self.focus as isize;
        for _ in 0..len {
            idx = (idx + direction).rem_euclid(len);
            if self.fields[idx as usize].focusable() {
                self.focus = idx as usize;
                return;
            }
        }
    }

    /// Keep the cursor on a focusable field after visibility changes.
    pub(crate) fn ensure_focus(&mut self) {
        if self.focused().is_none() {
            self.step_focus(1);
        }
    }

    /// Route a keystroke to the focused field. Returns the key of a pressed
    /// button or a submitted text field.
    pub(crate) fn handle(&mut self, input: FormInput) -> Option<K> {
        match input {
            FormInput::Next => {
                self.focus_next();
                None
            }
            FormInput::Previous => {
                self.focus_previous();
                None
            }
            input => {
                let field = self.fields.get_mut(self.focus)?;
                if field.hidden {
                    return None;
                }
                let key = field.key;
                field.apply(input).then_some(key)
            }
        }
    }

    fn get(&self, key: K) -> Option<&Field<K>> {
        self.fields.iter().find(|field| field.key == key)
    }

    fn get_mut(&mut self, key: K) -> Option<&mut Field<K>> {
        self.fields.iter_mut().find(|field| field.key == key)
    }

    pub(crate) fn set_hidden(&mut self, key: K, hidden: bool) {
        if let Some(field) = self.get_mut(key) {
            field.hidden = hidden;
        }
    }

    pub(crate) fn set_hidden_where(&mut self, predicate: impl Fn(K) -> bool, hidden: bool) {
        for field in self.fields.iter_mut().filter(|field| predicate(field.key)) {
            field.hidden = hidden;
        }
    }

    pub(crate) fn set_disabled(&mut self, key: K, disabled: bool) {
        if let Some(field) = self.get_mut(key) {
            field.disabled = disabled;
        }
    }

    pub(crate) fn is_hidden(&self, key: K) -> bool {
        self.get(key).map_or(true, |field| field.hidden)
    }

    pub(crate) fn is_disabled(&self, key: K) -> bool {
        self.get(key).is_some_and(|field| field.disabled)
    }

    pub(crate) fn text(&self, key: K) -> &str {
        match self.get(key).map(|field| &field.kind) {
            Some(FieldKind::Text { value, .. }) => value,
            _ => "",
        }
    }

    pub(crate) fn set_text(&mut self, key: K, text: &str) {
        if let Some(FieldKind::Text { value, .. }) = self.get_mut(key).map(|field| &mut field.kind) {
            *value = text.to_string();
        }
    }

    pub(crate) fn number(&self, key: K) -> u32 {
        match self.get(key).map(|field| &field.kind) {
            Some(FieldKind::Number { value, .. }) => *value,
            _ => 0,
        }
    }

    /// Label of the selected option, or "" for non-choice fields.
    pub(crate) fn choice(&self, key: K) -> &'static str {
        match self.get(key).map(|field| &field.kind) {
            Some(FieldKind::Choice { options, selected }) => {
                options.get(*selected).copied().unwrap_or_default()
            }
            _ => "",
        }
    }

    /// Typed selection; `None` for "All", blank entries and unknown labels.
    pub(crate) fn selected<T: Choice>(&self, key: K) -> Option<T> {
        T::from_label(self.choice(key))
    }

    /// Pick an option by label. Unknown labels leave the field untouched.
    #[cfg(test)]
    pub(crate) fn select_label(&mut self, key: K, label: &str) {
        if let Some(FieldKind::Choice { options, selected }) =
            self.get_mut(key).map(|field| &mut field.kind)
        {
            if let Some(idx) = options.iter().position(|option| *option == label) {
                *selected = idx;
            }
        }
    }

    pub(crate) fn date(&self, key: K) -> Option<NaiveDate> {
        match self.get(key).map(|field| &field.kind) {
            Some(FieldKind::Date { value, .. }) => Some(*value),
            _ => None,
        }
    }

    pub(crate) fn checked(&self, key: K) -> bool {
        matches!(
            self.get(key).map(|field| &field.kind),
            Some(FieldKind::Checkbox(true))
        )
    }

    /// Render visible fields with section headings. Also returns the line
    /// index of the focused field so callers can scroll to it.
    pub(crate) fn build_lines(&self, has_focus: bool) -> (Vec<Line<'static>>, usize) {
        let heading_style = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        let mut lines = Vec::new();
        let mut focused_line = 0;
        let mut current_section = "";

        for (idx, field) in self.fields.iter().enumerate() {
            if field.hidden {
                continue;
            }
            if field.section != current_section {
                current_section = field.section;
                if !current_section.is_empty() {
                    if !lines.is_empty() {
                        lines.push(Line::from(""));
                    }
                    lines.push(Line::from(Span::styled(current_section, heading_style)));
                }
            }
            let is_active = has_focus && idx == self.focus;
            if is_active {
                focused_line = lines.len();
            }
            lines.push(field.build_line(is_active));
        }

        (lines, focused_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Language, Zone};
    use proptest::prelude::*;

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    enum Key {
        Name,
        Count,
        Hour,
        Lang,
        Zone,
        When,
        Notify,
        Save,
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 12).unwrap()
    }

    fn sample_form() -> Form<Key> {
        Form::new()
            .section("Details")
            .field(Field::text(Key::Name, "Name"))
            .field(Field::count(Key::Count, "Count"))
            .field(Field::number(Key::Hour, "Hour", 0, 23, 0).format(NumberFormat::Padded))
            .field(Field::select::<Language>(Key::Lang, "Language"))
            .field(Field::filter(Key::Zone, "Zone", Zone::ALL))
            .field(Field::date(Key::When, "Date", today(), today(), 1))
            .section("Actions")
            .field(Field::checkbox(Key::Notify, "Notify"))
            .field(Field::button(Key::Save, "Save"))
    }

    #[test]
    fn typing_fills_the_focused_text_field() {
        let mut form = sample_form();
        for ch in "Ram".chars() {
            assert_eq!(form.handle(FormInput::Char(ch)), None);
        }
        form.handle(FormInput::Backspace);
        assert_eq!(form.text(Key::Name), "Ra");
        assert_eq!(form.handle(FormInput::Activate), Some(Key::Name));
    }

    #[test]
    fn focus_wraps_and_skips_hidden_fields() {
        let mut form = sample_form();
        form.set_hidden(Key::Count, true);
        form.focus_next();
        assert_eq!(form.focused_key(), Some(Key::Hour));
        form.focus(Key::Name);
        form.focus_previous();
        assert_eq!(form.focused_key(), Some(Key::Save));
        form.focus_next();
        assert_eq!(form.focused_key(), Some(Key::Name));
    }

    #[test]
    fn disabled_fields_are_skipped_and_ignore_input() {
        let mut form = sample_form();
        form.set_disabled(Key::Name, true);
        form.ensure_focus();
        assert_eq!(form.focused_key(), Some(Key::Count));
        assert!(form.is_disabled(Key::Name));
    }

    #[test]
    fn number_typing_clamps_to_max() {
        let mut form = sample_form();
        form.focus(Key::Hour);
        form.handle(FormInput::Char('4'));
        form.handle(FormInput::Char('2'));
        assert_eq!(form.number(Key::Hour), 23);
        form.handle(FormInput::Backspace);
        assert_eq!(form.number(Key::Hour), 2);
    }

    #[test]
    fn choices_cycle_in_both_directions() {
        let mut form = sample_form();
        form.focus(Key::Lang);
        assert_eq!(form.selected::<Language>(Key::Lang), Some(Language::English));
        form.handle(FormInput::Decrease);
        assert_eq!(form.selected::<Language>(Key::Lang), Some(Language::Punjabi));
        form.handle(FormInput::Increase);
        form.handle(FormInput::Increase);
        assert_eq!(form.choice(Key::Lang), "Hindi");
    }

    #[test]
    fn all_option_reads_back_as_none() {
        let mut form = sample_form();
        assert_eq!(form.selected::<Zone>(Key::Zone), None);
        form.select_label(Key::Zone, "Zone-3");
        assert_eq!(form.selected::<Zone>(Key::Zone), Some(Zone::Zone3));
    }

    #[test]
    fn date_cannot_pass_max() {
        let mut form = sample_form();
        form.focus(Key::When);
        form.handle(FormInput::Increase);
        assert_eq!(form.date(Key::When), Some(today()));
        form.handle(FormInput::Decrease);
        assert_eq!(form.date(Key::When), today().pred_opt());
    }

    #[test]
    fn buttons_report_activation_and_checkboxes_toggle() {
        let mut form = sample_form();
        form.focus(Key::Notify);
        assert_eq!(form.handle(FormInput::Char(' ')), None);
        assert!(form.checked(Key::Notify));
        form.focus(Key::Save);
        assert_eq!(form.handle(FormInput::Activate), Some(Key::Save));
    }

    #[test]
    fn lines_include_section_headings() {
        let form = sample_form();
        let (lines, focused) = form.build_lines(true);
        // 8 fields, 2 headings, 1 spacer.
        assert_eq!(lines.len(), 11);
        assert_eq!(focused, 1);
    }

    fn arb_input() -> impl Strategy<Value = FormInput> {
        prop_oneof![
            Just(FormInput::Increase),
            Just(FormInput::Decrease),
            Just(FormInput::Backspace),
            (0u32..10).prop_map(|d| FormInput::Char(char::from_digit(d, 10).unwrap())),
        ]
    }

    proptest! {
        #[test]
        fn numbers_stay_within_bounds(
            min in 0u32..50,
            span in 0u32..200,
            step in 1u32..40,
            inputs in prop::collection::vec(arb_input(), 0..40),
        ) {
            let max = min + span;
            let mut form = Form::new()
                .field(Field::number(Key::Count, "Count", min, max, min).step(step));
            for input in inputs {
                form.handle(input);
                let value = form.number(Key::Count);
                prop_assert!(value >= min && value <= max);
            }
        }

        #[test]
        fn dates_never_exceed_max(
            step in 1u64..10,
            moves in prop::collection::vec(any::<bool>(), 0..60),
        ) {
            let mut form = Form::new()
                .field(Field::date(Key::When, "Date", today(), today(), step));
            for forward in moves {
                form.handle(if forward { FormInput::Increase } else { FormInput::Decrease });
                prop_assert!(form.date(Key::When).unwrap() <= today());
            }
        }
    }
}
