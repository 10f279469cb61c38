/// Options page: API key and timing settings

use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::config::{Settings, load_settings, save_settings};

#[derive(Clone, PartialEq)]
enum PageState {
    Loading,
    Idle,
    Saving,
    Saved,
    Error(String),
}

#[derive(Clone, PartialEq, Default)]
struct FormFields {
    api_key: String,
    endpoint: String,
    request_timeout_ms: String,
    search_debounce_ms: String,
}

impl From<&Settings> for FormFields {
    fn from(settings: &Settings) -> Self {
        FormFields {
            api_key: settings.api_key.clone().unwrap_or_default(),
            endpoint: settings.endpoint.clone(),
            request_timeout_ms: settings.request_timeout_ms.to_string(),
            search_debounce_ms: settings.search_debounce_ms.to_string(),
        }
    }
}

fn field_input(
    fields: &UseStateHandle<FormFields>,
    update: fn(&mut FormFields, String),
) -> Callback<InputEvent> {
    let fields = fields.clone();
    Callback::from(move |e: InputEvent| {
        if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
            let mut next = (*fields).clone();
            update(&mut next, input.value());
            fields.set(next);
        }
    })
}

#[function_component(OptionsPage)]
pub fn options_page() -> Html {
    let state = use_state(|| PageState::Loading);
    let fields = use_state(FormFields::default);

    // Load stored settings on mount
    {
        let state = state.clone();
        let fields = fields.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match load_settings().await {
                    Ok(settings) => {
                        fields.set(FormFields::from(&settings));
                        state.set(PageState::Idle);
                    }
                    Err(e) => {
                        log::warn!("Failed to load settings: {}", e);
                        fields.set(FormFields::from(&Settings::default()));
                        state.set(PageState::Error(format!("Failed to load: {}", e)));
                    }
                }
            });
            || ()
        });
    }

    let on_api_key = field_input(&fields, |form, value| form.api_key = value);
    let on_endpoint = field_input(&fields, |form, value| form.endpoint = value);
    let on_timeout = field_input(&fields, |form, value| form.request_timeout_ms = value);
    let on_debounce = field_input(&fields, |form, value| form.search_debounce_ms = value);

    let on_save = {
        let state = state.clone();
        let fields = fields.clone();

        Callback::from(move |_: MouseEvent| {
            let settings = match Settings::from_form(
                &fields.api_key,
                &fields.endpoint,
                &fields.request_timeout_ms,
                &fields.search_debounce_ms,
            ) {
                Ok(settings) => settings,
                Err(e) => {
                    state.set(PageState::Error(e.to_string()));
                    return;
                }
            };

            let state = state.clone();
            let fields = fields.clone();
            state.set(PageState::Saving);

            spawn_local(async move {
                match save_settings(&settings).await {
                    Ok(()) => {
                        log::info!("Settings saved");
                        fields.set(FormFields::from(&settings));
                        state.set(PageState::Saved);
                    }
                    Err(e) => {
                        state.set(PageState::Error(format!("Failed to save: {}", e)));
                    }
                }
            });
        })
    };

    let on_reset = {
        let fields = fields.clone();
        Callback::from(move |_: MouseEvent| {
            fields.set(FormFields::from(&Settings::default()));
        })
    };

    let is_busy = matches!(*state, PageState::Loading | PageState::Saving);

    html! {
        <div class="container">
            <div class="header">
                <h1 class="main-title">{"Tab Pilot Options"}</h1>
            </div>

            // Status display
            {match &*state {
                PageState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{"Loading settings..."}</p>
                    </div>
                },
                PageState::Saving => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{"Saving..."}</p>
                    </div>
                },
                PageState::Saved => html! {
                    <Alert r#type={AlertType::Success} title={"Settings saved"} inline={true}>
                    </Alert>
                },
                PageState::Error(err) => html! {
                    <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                        {err.clone()}
                    </Alert>
                },
                PageState::Idle => html! {}
            }}

            <div class="flex-column-gap">
                <label class="field-label">
                    {"API key"}
                    <input
                        type="password"
                        autocomplete="off"
                        value={fields.api_key.clone()}
                        oninput={on_api_key}
                        class="search-input"
                    />
                </label>
                <p class="field-hint">{"Stored in this browser profile only."}</p>

                <label class="field-label">
                    {"Endpoint"}
                    <input
                        type="url"
                        value={fields.endpoint.clone()}
                        oninput={on_endpoint}
                        class="search-input"
                    />
                </label>

                <label class="field-label">
                    {"Request timeout (ms)"}
                    <input
                        type="number"
                        min="1000"
                        value={fields.request_timeout_ms.clone()}
                        oninput={on_timeout}
                        class="search-input"
                    />
                </label>

                <label class="field-label">
                    {"Search delay (ms)"}
                    <input
                        type="number"
                        min="0"
                        value={fields.search_debounce_ms.clone()}
                        oninput={on_debounce}
                        class="search-input"
                    />
                </label>

                <div class="flex-row-gap">
                    <Button onclick={on_save} disabled={is_busy}>
                        {"💾 Save"}
                    </Button>
                    <Button onclick={on_reset} disabled={is_busy} variant={ButtonVariant::Secondary}>
                        {"Restore defaults"}
                    </Button>
                </div>
            </div>
        </div>
    }
}
