/// Reusable UI components

use patternfly_yew::prelude::*;
use wasm_bindgen::JsValue;
use web_sys::{HtmlImageElement, HtmlInputElement};
use yew::prelude::*;

use crate::operations::Command;
use crate::tab_data::TabRow;
use crate::view_state::PLACEHOLDER_FAVICON;

#[derive(Properties, PartialEq)]
pub struct TabCardProps {
    pub row: TabRow,
    pub selected: bool,
    pub on_command: Callback<Command>,
}

#[function_component(TabCard)]
pub fn tab_card(props: &TabCardProps) -> Html {
    let row = &props.row;
    let id = row.id;

    let card_ref = use_node_ref();

    // Listeners are delegated to the app root, so compare against the card node
    let on_keydown = {
        let on_command = props.on_command.clone();
        let card_ref = card_ref.clone();
        Callback::from(move |e: KeyboardEvent| {
            let on_row = match (e.target(), card_ref.get()) {
                (Some(target), Some(card)) => JsValue::from(target) == JsValue::from(card),
                _ => false,
            };
            if let Some(command) = Command::from_row_key(id, &e.key(), on_row) {
                on_command.emit(command);
            }
        })
    };

    let on_select = {
        let on_command = props.on_command.clone();
        Callback::from(move |e: Event| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                on_command.emit(Command::ToggleSelect(id, input.checked()));
            }
        })
    };

    let on_favicon_error = Callback::from(|e: Event| {
        if let Some(img) = e.target_dyn_into::<HtmlImageElement>() {
            if img.src() != PLACEHOLDER_FAVICON {
                img.set_src(PLACEHOLDER_FAVICON);
            }
        }
    });

    let class = if row.active { "card card-active" } else { "card" };

    html! {
        <div ref={card_ref} class={class} role="listitem" tabindex="0" onkeydown={on_keydown}>
            <img
                class="favicon"
                alt=""
                width="40"
                height="40"
                src={row.favicon.clone()}
                onerror={on_favicon_error}
            />
            <div class="info">
                <div class="title-text">
                    {if row.pinned { "📌 " } else { "" }}
                    {&row.title}
                </div>
                <div class="url-text">{&row.label}</div>
            </div>
            <div class="actions">
                <input
                    type="checkbox"
                    title="Select for bulk action"
                    checked={props.selected}
                    onchange={on_select}
                />
                <Button
                    onclick={props.on_command.reform(move |_: MouseEvent| Command::Activate(id))}
                    size={ButtonSize::Small}
                >
                    {"Open"}
                </Button>
                <Button
                    onclick={props.on_command.reform(move |_: MouseEvent| Command::TogglePin(id))}
                    variant={ButtonVariant::Secondary}
                    size={ButtonSize::Small}
                >
                    {if row.pinned { "Unpin" } else { "Pin" }}
                </Button>
                <Button
                    onclick={props.on_command.reform(move |_: MouseEvent| Command::Close(id))}
                    variant={ButtonVariant::Danger}
                    size={ButtonSize::Small}
                >
                    {"Close"}
                </Button>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatsPanelProps {
    pub summary: String,
    pub focus_score: u32,
    pub active_time: String,
    pub top_hostnames: Vec<(String, usize)>,
}

#[function_component(StatsPanel)]
pub fn stats_panel(props: &StatsPanelProps) -> Html {
    html! {
        <div class="stats-container">
            <p class="stats-summary">{&props.summary}</p>
            <div class="stats-box">
                <div class="stat-item">
                    <span class="stat-domain">{"Focus score"}</span>
                    <span class="stat-count">{props.focus_score}</span>
                </div>
                <div class="stat-item">
                    <span class="stat-domain">{"Active time"}</span>
                    <span class="stat-count">{&props.active_time}</span>
                </div>
            </div>
            if !props.top_hostnames.is_empty() {
                <h2 class="stats-title">{"Top sites"}</h2>
                <div class="stats-box">
                    {for props.top_hostnames.iter().map(|(hostname, count)| html! {
                        <div class="stat-item" key={hostname.clone()}>
                            <span class="stat-domain">{hostname.clone()}</span>
                            <span class="stat-count">{*count}</span>
                        </div>
                    })}
                </div>
            }
        </div>
    }
}

/// Progress of one suggestion request
#[derive(Clone, PartialEq)]
pub enum SuggestionStatus {
    Idle,
    Thinking,
    Answered(String),
}

#[derive(Properties, PartialEq)]
pub struct SuggestionTextProps {
    pub status: SuggestionStatus,
}

#[function_component(SuggestionText)]
pub fn suggestion_text(props: &SuggestionTextProps) -> Html {
    match &props.status {
        SuggestionStatus::Idle => html! {},
        SuggestionStatus::Thinking => html! {
            <div class="loading-text-center">
                <Spinner />
                <p class="loading-text">{"Thinking..."}</p>
            </div>
        },
        SuggestionStatus::Answered(text) => html! {
            <p class="suggestion-text">{text.clone()}</p>
        },
    }
}
