use dioxus::prelude::*;
use quiz_core::model::{AiProvider, AppSettings, AppSettingsDraft};
use services::AppSettingsServiceError;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct AiSettingsForm {
    provider: String,
    project: String,
    location: String,
    embedding_model: String,
    chat_model: String,
    api_key: String,
    api_base_url: String,
}

impl AiSettingsForm {
    fn from_settings(settings: &AppSettings) -> Self {
        Self {
            provider: settings
                .provider()
                .map(|provider| provider.as_str().to_string())
                .unwrap_or_default(),
            project: settings.project().unwrap_or_default().to_string(),
            location: settings.location().unwrap_or_default().to_string(),
            embedding_model: settings.embedding_model().unwrap_or_default().to_string(),
            chat_model: settings.chat_model().unwrap_or_default().to_string(),
            api_key: settings.api_key().unwrap_or_default().to_string(),
            api_base_url: settings.api_base_url().unwrap_or_default().to_string(),
        }
    }

    fn to_draft(&self) -> AppSettingsDraft {
        AppSettingsDraft {
            provider: to_optional(&self.provider),
            project: to_optional(&self.project),
            location: to_optional(&self.location),
            embedding_model: to_optional(&self.embedding_model),
            chat_model: to_optional(&self.chat_model),
            api_key: to_optional(&self.api_key),
            api_base_url: to_optional(&self.api_base_url),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum SaveState {
    Idle,
    Saving,
    Saved,
    Error(ViewError),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    Project,
    Location,
    EmbeddingModel,
    ChatModel,
    ApiKey,
    ApiBaseUrl,
}

impl Field {
    fn label(self) -> &'static str {
        match self {
            Field::Project => "Project",
            Field::Location => "Location",
            Field::EmbeddingModel => "Embedding model",
            Field::ChatModel => "Chat model",
            Field::ApiKey => "API key",
            Field::ApiBaseUrl => "Base URL",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            Field::Project => "quizify-428719",
            Field::Location => "us-central1",
            Field::EmbeddingModel => "textembedding-gecko@003",
            Field::ChatModel => "gemini-pro",
            Field::ApiKey => "Access token or API key",
            Field::ApiBaseUrl => "https://api.openai.com/v1",
        }
    }

    fn input_type(self) -> &'static str {
        match self {
            Field::ApiKey => "password",
            _ => "text",
        }
    }

    fn get(self, form: &AiSettingsForm) -> &str {
        match self {
            Field::Project => &form.project,
            Field::Location => &form.location,
            Field::EmbeddingModel => &form.embedding_model,
            Field::ChatModel => &form.chat_model,
            Field::ApiKey => &form.api_key,
            Field::ApiBaseUrl => &form.api_base_url,
        }
    }

    fn set(self, form: &mut AiSettingsForm, value: String) {
        match self {
            Field::Project => form.project = value,
            Field::Location => form.location = value,
            Field::EmbeddingModel => form.embedding_model = value,
            Field::ChatModel => form.chat_model = value,
            Field::ApiKey => form.api_key = value,
            Field::ApiBaseUrl => form.api_base_url = value,
        }
    }
}

const FIELDS: [Field; 6] = [
    Field::Project,
    Field::Location,
    Field::EmbeddingModel,
    Field::ChatModel,
    Field::ApiKey,
    Field::ApiBaseUrl,
];

fn to_optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn save_error(err: &AppSettingsServiceError) -> ViewError {
    match err {
        AppSettingsServiceError::Validation(err) => ViewError::Action(err.to_string()),
        _ => ViewError::Unknown,
    }
}

#[component]
pub fn SettingsView() -> Element {
    let ctx = use_context::<AppContext>();
    let app_settings = ctx.app_settings();
    let app_settings_for_resource = app_settings.clone();
    let app_settings_for_status = app_settings.clone();
    let mut form = use_signal(AiSettingsForm::default);
    let mut initial = use_signal(AiSettingsForm::default);
    let mut save_state = use_signal(|| SaveState::Idle);
    let mut settings_loaded = use_signal(|| false);

    let settings_resource = use_resource(move || {
        let app_settings = app_settings_for_resource.clone();
        async move {
            let settings = app_settings.load().await.map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(settings)
        }
    });

    // Restarted after every save.
    let status_resource = use_resource(move || {
        let app_settings = app_settings_for_status.clone();
        async move {
            let status = match app_settings.effective_config().await {
                Ok(config) => format!(
                    "Ready: {} ({} / {})",
                    config.provider, config.chat_model, config.embedding_model
                ),
                Err(err) => format!("Not ready: {err}"),
            };
            Ok::<_, ViewError>(status)
        }
    });

    let settings_state = view_state_from_resource(settings_resource);
    if let ViewState::Ready(settings) = &settings_state
        && !settings_loaded()
    {
        let next = AiSettingsForm::from_settings(settings);
        form.set(next.clone());
        initial.set(next);
        settings_loaded.set(true);
    }

    let form_value = form();
    let is_dirty = form_value != initial();
    let status_label = match save_state() {
        SaveState::Saving => Some("Saving...".to_string()),
        SaveState::Error(err) => Some(err.message().to_string()),
        SaveState::Saved if !is_dirty => Some("Saved".to_string()),
        _ if is_dirty => Some("Unsaved changes".to_string()),
        _ => None,
    };
    let provider_status = match view_state_from_resource(status_resource) {
        ViewState::Ready(status) => status,
        _ => String::new(),
    };

    let provider_options = AiProvider::all().into_iter().map(|provider| {
        let value = provider.as_str();
        rsx! {
            option {
                value: "{value}",
                selected: form_value.provider == value,
                "{value}"
            }
        }
    });
    let field_rows = FIELDS.iter().map(|&field| {
        let value = field.get(&form_value).to_string();
        rsx! {
            label { class: "settings-row",
                span { class: "settings-row__label", "{field.label()}" }
                input {
                    class: "settings-input",
                    r#type: field.input_type(),
                    placeholder: field.placeholder(),
                    value: "{value}",
                    oninput: move |evt| {
                        let mut next = form();
                        field.set(&mut next, evt.value());
                        form.set(next);
                        save_state.set(SaveState::Idle);
                    },
                }
            }
        }
    });

    rsx! {
        div { class: "page settings-page",
            header { class: "settings-topbar",
                h2 { class: "settings-title", "AI provider" }
                if let Some(label) = status_label {
                    p { class: "settings-status", "{label}" }
                }
            }
            if let ViewState::Error(err) = &settings_state {
                p { class: "settings-error", "{err.message()}" }
            }
            p { class: "view-hint",
                "Empty fields fall back to QUIZIFY_* environment variables, then to defaults."
            }
            if !provider_status.is_empty() {
                p { class: "settings-provider-status", "{provider_status}" }
            }

            section { class: "settings-card",
                label { class: "settings-row",
                    span { class: "settings-row__label", "Provider" }
                    select {
                        class: "settings-input",
                        onchange: move |evt| {
                            let mut next = form();
                            next.provider = evt.value();
                            form.set(next);
                            save_state.set(SaveState::Idle);
                        },
                        option { value: "", selected: form_value.provider.is_empty(), "default" }
                        {provider_options}
                    }
                }
                {field_rows}
            }

            div { class: "settings-actions",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: !is_dirty,
                    onclick: move |_| {
                        form.set(initial());
                        save_state.set(SaveState::Idle);
                    },
                    "Cancel"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: !is_dirty || save_state() == SaveState::Saving,
                    onclick: move |_| {
                        let draft = form().to_draft();
                        let mut initial = initial;
                        let mut form = form;
                        let mut save_state = save_state;
                        let mut status_resource = status_resource;
                        let app_settings = app_settings.clone();
                        spawn(async move {
                            save_state.set(SaveState::Saving);
                            match app_settings.save(draft).await {
                                Ok(settings) => {
                                    let next = AiSettingsForm::from_settings(&settings);
                                    form.set(next.clone());
                                    initial.set(next);
                                    save_state.set(SaveState::Saved);
                                    status_resource.restart();
                                }
                                Err(err) => {
                                    tracing::warn!(error = %err, "saving settings failed");
                                    save_state.set(SaveState::Error(save_error(&err)));
                                }
                            }
                        });
                    },
                    "Save"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_roundtrips_through_settings() {
        let form = AiSettingsForm {
            provider: "openai".into(),
            chat_model: " gpt-4o ".into(),
            api_base_url: "http://localhost:8080/v1".into(),
            ..AiSettingsForm::default()
        };
        let settings = form.to_draft().validate().unwrap();
        let back = AiSettingsForm::from_settings(&settings);
        assert_eq!(back.provider, "openai");
        assert_eq!(back.chat_model, "gpt-4o");
        assert!(back.project.is_empty());
    }

    #[test]
    fn validation_errors_are_shown_to_the_user() {
        let err = AiSettingsForm {
            api_base_url: "not a url".into(),
            ..AiSettingsForm::default()
        }
        .to_draft()
        .validate()
        .unwrap_err();
        let view_err = save_error(&AppSettingsServiceError::Validation(err));
        assert!(matches!(view_err, ViewError::Action(_)));
    }
}
