#![allow(non_snake_case)]

mod api;
mod log;
mod model;
#[cfg(feature = "server")]
mod upstream;

use dioxus::prelude::*;

use api::fetch_logs;
use log::ActivityEntry;
use model::{
    ITEMS_PER_PAGE_OPTIONS, LogFilter, LogRecord, filter_records, page_count, paginate,
    parse_timestamp, standardize_type, unique_days, unique_events, unique_types,
};

fn main() {
    dioxus::launch(App);
}

/// Full timestamp for a log card, en-UK style; mirrors the day format used
/// for filtering.
fn format_timestamp(timestamp: Option<&str>) -> String {
    match timestamp.and_then(parse_timestamp) {
        Some(dt) => dt.format("%d/%m/%Y, %H:%M:%S").to_string(),
        None => "Invalid Date".to_string(),
    }
}

fn type_class(kind: Option<&str>) -> &'static str {
    match kind.map(|k| standardize_type(k)).as_deref() {
        Some("ERROR") => "log-card log-error",
        Some("WARN") => "log-card log-warn",
        Some("INFO") => "log-card log-info",
        Some("DEBUG") => "log-card log-debug",
        _ => "log-card log-other",
    }
}

#[component]
fn App() -> Element {
    let mut logs = use_signal(Vec::<LogRecord>::new);
    let mut filter = use_signal(LogFilter::default);
    let mut current_page = use_signal(|| 1usize);
    let mut items_per_page = use_signal(|| 25usize);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| None::<String>);
    let mut activity_open = use_signal(|| false);
    let mut activity = use_signal(Vec::<ActivityEntry>::new);

    // Shared by the initial load and the Refresh button: replace the whole
    // working set and snap back to page 1.
    let load_logs = move || {
        spawn(async move {
            loading.set(true);
            error.set(None);
            match fetch_logs().await {
                Ok(records) => {
                    logs.set(records);
                    current_page.set(1);
                }
                Err(e) => {
                    let message = e.to_string();
                    error.set(Some(if message.is_empty() {
                        "Failed to load logs. Please try again later.".to_string()
                    } else {
                        message
                    }));
                }
            }
            loading.set(false);
        });
    };

    use_effect(move || {
        load_logs();
    });

    let filtered_logs = use_memo(move || filter_records(&logs.read(), &filter.read()));
    let total_pages = use_memo(move || page_count(filtered_logs.read().len(), *items_per_page.read()));
    let paginated_logs = use_memo(move || {
        paginate(
            &filtered_logs.read(),
            *current_page.read(),
            *items_per_page.read(),
        )
    });

    // Facet options come from the unfiltered set so they never shrink as
    // other filters are applied.
    let events = use_memo(move || unique_events(&logs.read()));
    let types = use_memo(move || unique_types(&logs.read()));
    let days = use_memo(move || unique_days(&logs.read()));

    rsx! {
        document::Stylesheet { href: asset!("/assets/styles.css") }

        div { class: "page",
            header { class: "toolbar",
                h1 { "Logs" }
                div { class: "toolbar-actions",
                    Button {
                        label: "Refresh",
                        secondary: false,
                        disabled: *loading.read(),
                        onclick: move |_| load_logs(),
                    }
                    Button {
                        label: "Activity",
                        secondary: true,
                        disabled: false,
                        onclick: move |_| {
                            activity.set(log::activity_snapshot());
                            let open = !*activity_open.read();
                            activity_open.set(open);
                        },
                    }
                }
            }

            {if *activity_open.read() {
                rsx! {
                    ActivityPanel {
                        entries: activity.read().clone(),
                        on_refresh: move |_| activity.set(log::activity_snapshot()),
                    }
                }
            } else {
                rsx! { }
            }}

            if *loading.read() {
                div { class: "loading",
                    div { class: "spinner" }
                }
            } else if error.read().is_some() {
                div { class: "error-panel",
                    h2 { "Error" }
                    p { "{error.read().clone().unwrap_or_default()}" }
                }
            } else {
                div { class: "filters",
                    select {
                        value: "{filter.read().event}",
                        onchange: move |evt| filter.with_mut(|f| f.event = evt.value()),
                        option { value: "", "All Events" }
                        for event in events.read().iter() {
                            option { key: "{event}", value: "{event}", "{event}" }
                        }
                    }
                    select {
                        value: "{filter.read().kind}",
                        onchange: move |evt| filter.with_mut(|f| f.kind = evt.value()),
                        option { value: "", "All Types" }
                        for kind in types.read().iter() {
                            option { key: "{kind}", value: "{kind}", "{kind}" }
                        }
                    }
                    select {
                        value: "{filter.read().day}",
                        onchange: move |evt| filter.with_mut(|f| f.day = evt.value()),
                        option { value: "", "All Days" }
                        for day in days.read().iter() {
                            option { key: "{day}", value: "{day}", "{day}" }
                        }
                    }
                    input {
                        r#type: "text",
                        class: "search-input",
                        placeholder: "Search in messages...",
                        value: "{filter.read().search}",
                        oninput: move |evt| filter.with_mut(|f| f.search = evt.value()),
                    }
                }

                div { class: "log-list",
                    for record in paginated_logs.read().clone() {
                        LogCard {
                            key: "{record.id.clone().unwrap_or_default()}",
                            record,
                        }
                    }
                }

                {if *total_pages.read() > 1 {
                    rsx! {
                        div { class: "pagination",
                            div { class: "page-size",
                                span { "Items per page:" }
                                select {
                                    value: "{items_per_page.read()}",
                                    onchange: move |evt| {
                                        if let Ok(size) = evt.value().parse::<usize>() {
                                            items_per_page.set(size);
                                            current_page.set(1);
                                        }
                                    },
                                    for size in ITEMS_PER_PAGE_OPTIONS {
                                        option { key: "{size}", value: "{size}", "{size}" }
                                    }
                                }
                            }
                            div { class: "page-nav",
                                Button {
                                    label: "Previous",
                                    secondary: true,
                                    disabled: *current_page.read() == 1,
                                    onclick: move |_| {
                                        let prev = *current_page.read();
                                        current_page.set(prev.saturating_sub(1).max(1));
                                    },
                                }
                                span { "Page {current_page.read()} of {total_pages.read()}" }
                                Button {
                                    label: "Next",
                                    secondary: true,
                                    disabled: *current_page.read() == *total_pages.read(),
                                    onclick: move |_| {
                                        let next = *current_page.read() + 1;
                                        current_page.set(next.min((*total_pages.read()).max(1)));
                                    },
                                }
                            }
                        }
                    }
                } else {
                    rsx! { }
                }}
            }
        }
    }
}

#[component]
fn LogCard(record: LogRecord) -> Element {
    let card_class = type_class(record.kind.as_deref());
    let time = format_timestamp(record.timestamp.as_deref());
    let kind = record.kind.as_deref().map(standardize_type).unwrap_or_default();
    let message = record.message.clone().unwrap_or_default();

    rsx! {
        div { class: "{card_class}",
            div { class: "log-card-meta",
                span { "{time}" }
                span { class: "log-type-badge", "{kind}" }
            }
            p { class: "log-message", "{message}" }
        }
    }
}

#[component]
fn Button(
    label: String,
    secondary: bool,
    disabled: bool,
    onclick: EventHandler<MouseEvent>,
) -> Element {
    let class = if secondary { "btn btn-secondary" } else { "btn btn-primary" };
    rsx! {
        button {
            class: "{class}",
            disabled: disabled,
            onclick: move |evt| onclick.call(evt),
            "{label}"
        }
    }
}

#[component]
fn ActivityPanel(entries: Vec<ActivityEntry>, on_refresh: EventHandler<MouseEvent>) -> Element {
    rsx! {
        div { class: "activity-panel",
            div { class: "activity-header",
                h2 { "Activity" }
                Button {
                    label: "Refresh",
                    secondary: true,
                    disabled: false,
                    onclick: move |evt| on_refresh.call(evt),
                }
            }
            div { class: "activity-lines",
                for entry in entries.iter() {
                    div { class: "activity-line",
                        span { class: "activity-time", "{entry.time}" }
                        span {
                            class: if entry.is_error() { "activity-level activity-error" } else { "activity-level" },
                            "{entry.level}"
                        }
                        span { "{entry.message}" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_render_in_uk_order() {
        assert_eq!(
            format_timestamp(Some("2024-01-02T10:00:00Z")),
            "02/01/2024, 10:00:00"
        );
        assert_eq!(format_timestamp(Some("nonsense")), "Invalid Date");
        assert_eq!(format_timestamp(None), "Invalid Date");
    }

    #[test]
    fn card_class_follows_standardized_type() {
        assert_eq!(type_class(Some("error")), "log-card log-error");
        assert_eq!(type_class(Some("Warn")), "log-card log-warn");
        assert_eq!(type_class(Some("custom")), "log-card log-other");
        assert_eq!(type_class(None), "log-card log-other");
    }
}
