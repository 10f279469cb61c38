/// Popup UI for Tab Pilot

use std::rc::Rc;

use futures_util::lock::Mutex;
use gloo_timers::callback::{Interval, Timeout};
use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::chrome::{self, ChromeTabs};
use crate::config::{Settings, load_settings};
use crate::domain::get_top_hostnames;
use crate::operations::{Command, Dispatcher, Effect};
use crate::stats::{focus_score, format_active_time, tab_summary};
use crate::suggestion::{SuggestionClient, WELLBEING_TOP_HOSTNAMES, wellbeing_prompt};
use crate::ui::components::{StatsPanel, SuggestionStatus, SuggestionText, TabCard};
use crate::view_state::{VisibleRows, ViewState, compute_visible_rows};

type SharedDispatcher = Rc<Mutex<Dispatcher<ChromeTabs>>>;

#[function_component(App)]
pub fn app() -> Html {
    let dispatcher = use_state(|| -> SharedDispatcher {
        Rc::new(Mutex::new(Dispatcher::new(ChromeTabs)))
    });
    let view = use_state(ViewState::new);
    let loaded = use_state(|| false);
    let settings = use_state(Settings::default);
    let active_seconds = use_state(|| 0u64);
    let search_timer = use_mut_ref(|| None::<Timeout>);
    let prompt = use_state(String::new);
    let answer = use_state(|| SuggestionStatus::Idle);
    let wellbeing = use_state(|| SuggestionStatus::Idle);

    // Load settings and the first tab snapshot on mount
    {
        let dispatcher = (*dispatcher).clone();
        let view = view.clone();
        let loaded = loaded.clone();
        let settings = settings.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match load_settings().await {
                    Ok(stored) => settings.set(stored),
                    Err(e) => log::warn!("Using default settings: {}", e),
                }

                let mut guard = dispatcher.lock().await;
                if guard.refresh().await.is_ok() {
                    log::info!("Popup opened with {} tabs", guard.state().tabs.len());
                }
                view.set(guard.state().clone());
                loaded.set(true);
            });
            || ()
        });
    }

    // Active-time ticker, dropped with the popup
    {
        let active_seconds = active_seconds.clone();

        use_effect_with((), move |_| {
            let opened_at = js_sys::Date::now();
            let interval = Interval::new(1_000, move || {
                let elapsed = (js_sys::Date::now() - opened_at).max(0.0) / 1_000.0;
                active_seconds.set(elapsed as u64);
            });
            move || drop(interval)
        });
    }

    let on_command = {
        let dispatcher = (*dispatcher).clone();
        let view = view.clone();
        let search_timer = search_timer.clone();
        let debounce_ms = settings.search_debounce_ms;

        Callback::from(move |command: Command| {
            let dispatcher = dispatcher.clone();
            let view = view.clone();
            let search_timer = search_timer.clone();

            spawn_local(async move {
                let effect = {
                    let mut guard = dispatcher.lock().await;
                    let effect = guard.dispatch(command).await;
                    if matches!(effect, Effect::Render | Effect::SelectionChanged) {
                        view.set(guard.state().clone());
                    }
                    effect
                };

                match effect {
                    Effect::ClosePopup => chrome::close_popup(),
                    Effect::SearchPending(ticket) => {
                        let timer = Timeout::new(debounce_ms, move || {
                            settle_search(dispatcher, view, ticket);
                        });
                        // Dropping the previous handle cancels its timer
                        *search_timer.borrow_mut() = Some(timer);
                    }
                    Effect::Render | Effect::SelectionChanged | Effect::Ignored => {}
                }
            });
        })
    };

    let on_search_input = on_command.reform(|e: InputEvent| {
        let query = e
            .target_dyn_into::<HtmlInputElement>()
            .map(|input| input.value())
            .unwrap_or_default();
        Command::Search(query)
    });

    let on_prompt_input = {
        let prompt = prompt.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                prompt.set(input.value());
            }
        })
    };

    let on_ask = {
        let prompt = prompt.clone();
        let answer = answer.clone();
        let client = SuggestionClient::from_settings(&settings);

        Callback::from(move |_: MouseEvent| {
            let text = prompt.trim().to_string();
            if text.is_empty() {
                return;
            }
            request_suggestion(client.clone(), text, answer.clone());
        })
    };

    let on_wellbeing = {
        let view = view.clone();
        let wellbeing = wellbeing.clone();
        let client = SuggestionClient::from_settings(&settings);

        Callback::from(move |_: MouseEvent| {
            let urls: Vec<String> = view.tabs.iter().map(|tab| tab.url.clone()).collect();
            let top = get_top_hostnames(&urls, WELLBEING_TOP_HOSTNAMES);
            let text = wellbeing_prompt(urls.len(), &top);
            request_suggestion(client.clone(), text, wellbeing.clone());
        })
    };

    let on_options = Callback::from(|_: MouseEvent| {
        spawn_local(chrome::open_options_page());
    });

    // Rows only depend on tabs and query, not on the selection
    let rows = use_memo((view.tabs.clone(), view.query.clone()), |(tabs, query)| {
        compute_visible_rows(tabs, query)
    });

    let urls: Vec<String> = view.tabs.iter().map(|tab| tab.url.clone()).collect();
    let top_hostnames = get_top_hostnames(&urls, WELLBEING_TOP_HOSTNAMES);
    let pinned = view.tabs.iter().filter(|tab| tab.pinned).count();
    let bulk_enabled = view.bulk_enabled();
    let ai_busy = *answer == SuggestionStatus::Thinking;
    let wellbeing_busy = *wellbeing == SuggestionStatus::Thinking;

    html! {
        <div class="padding-20">
            <div class="header">
                <h1 class="popup-title">{"Tab Pilot"}</h1>
                <Button onclick={on_options} variant={ButtonVariant::Secondary}>
                    {"⚙️ Options"}
                </Button>
            </div>

            if let Some(error) = view.load_error.clone() {
                <Alert r#type={AlertType::Danger} title={error} inline={true}>
                </Alert>
            }

            <StatsPanel
                summary={tab_summary(view.tabs.len(), pinned)}
                focus_score={focus_score(view.tabs.len())}
                active_time={format_active_time(*active_seconds)}
                top_hostnames={top_hostnames}
            />

            <div class="search-container">
                <input
                    type="text"
                    placeholder="Search tabs by title or URL..."
                    oninput={on_search_input}
                    class="search-input"
                />
            </div>

            <div class="flex-row-gap">
                <Button
                    onclick={on_command.reform(|_: MouseEvent| Command::FocusSelected)}
                    disabled={!bulk_enabled}
                    variant={if bulk_enabled { ButtonVariant::Primary } else { ButtonVariant::Secondary }}
                >
                    {"🎯 Focus selected"}
                </Button>
                <Button
                    onclick={on_command.reform(|_: MouseEvent| Command::CloseSelected)}
                    disabled={!bulk_enabled}
                    variant={ButtonVariant::Danger}
                >
                    {format!("🗑️ Close selected ({})", view.selection.len())}
                </Button>
            </div>

            <div class="tab-list" role="list">
                if !*loaded {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{"Loading tabs..."}</p>
                    </div>
                } else {
                    {match &*rows {
                        VisibleRows::Rows(rows) => html! {
                            <>
                                {for rows.iter().map(|row| html! {
                                    <TabCard
                                        key={row.id.to_string()}
                                        row={row.clone()}
                                        selected={view.selection.contains(row.id)}
                                        on_command={on_command.clone()}
                                    />
                                })}
                            </>
                        },
                        empty => html! {
                            <div class="empty-state">
                                <p>{empty.message().unwrap_or_default()}</p>
                            </div>
                        },
                    }}
                }
            </div>

            <div class="ai-container">
                <h2 class="stats-title">{"Ask AI"}</h2>
                if !settings.has_api_key() {
                    <Alert r#type={AlertType::Info} title={"Add an API key on the options page to enable suggestions."} inline={true}>
                    </Alert>
                }
                <div class="flex-row-gap">
                    <input
                        type="text"
                        placeholder="Ask anything..."
                        value={(*prompt).clone()}
                        oninput={on_prompt_input}
                        class="search-input"
                    />
                    <Button onclick={on_ask} disabled={ai_busy} variant={ButtonVariant::Secondary}>
                        {"Ask"}
                    </Button>
                </div>
                <SuggestionText status={(*answer).clone()} />

                <Button onclick={on_wellbeing} disabled={wellbeing_busy} variant={ButtonVariant::Secondary} block={true}>
                    {"🌱 Suggest a break"}
                </Button>
                <SuggestionText status={(*wellbeing).clone()} />
            </div>

            <p class="footer-popup">
                {"Tab Pilot v0.1.0"}
            </p>
        </div>
    }
}

// Helper functions

fn settle_search(dispatcher: SharedDispatcher, view: UseStateHandle<ViewState>, ticket: u64) {
    spawn_local(async move {
        let mut guard = dispatcher.lock().await;
        if guard.settle_search(ticket) == Effect::Render {
            view.set(guard.state().clone());
        }
    });
}

fn request_suggestion(
    client: SuggestionClient,
    prompt: String,
    status: UseStateHandle<SuggestionStatus>,
) {
    status.set(SuggestionStatus::Thinking);

    spawn_local(async move {
        let text = client.get_suggestion(&prompt).await;
        status.set(SuggestionStatus::Answered(text));
    });
}
