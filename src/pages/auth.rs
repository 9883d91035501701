use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::components::Notice;
use crate::models::RegisterRequest;
use crate::session::Session;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Credentials {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub password: String,
    pub confirm_password: String,
}

impl Credentials {
    /// Checks the fields the chosen mode submits.
    pub fn validate(&self, registering: bool) -> Result<(), &'static str> {
        let user_id = self.user_id.trim();
        if user_id.is_empty() || self.password.is_empty() {
            return Err("User ID and password are required.");
        }
        if !registering {
            return Ok(());
        }
        if !(4..=50).contains(&user_id.chars().count()) {
            return Err("User ID must be between 4 and 50 characters.");
        }
        if self.name.trim().is_empty() {
            return Err("Name is required.");
        }
        if !self.email.contains('@') {
            return Err("Enter a valid email address.");
        }
        if self.password.chars().count() < 8 {
            return Err("Password must be at least 8 characters.");
        }
        if self.password != self.confirm_password {
            return Err("Passwords do not match.");
        }
        Ok(())
    }

    fn register_request(&self) -> RegisterRequest {
        RegisterRequest {
            user_id: self.user_id.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            name: self.name.trim().to_string(),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct AuthScreenProps {
    pub api_base: String,
    pub on_authenticated: Callback<Session>,
    pub notify: Callback<Notice>,
}

fn credential_input(
    label: &'static str,
    kind: &'static str,
    value: &str,
    credentials: &UseStateHandle<Credentials>,
    apply: fn(&mut Credentials, String),
) -> Html {
    let credentials = credentials.clone();
    let oninput = Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let mut next = (*credentials).clone();
        apply(&mut next, input.value());
        credentials.set(next);
    });
    html! {
        <div class="space-y-1">
            <label class="text-sm font-medium text-foreground">{ label }</label>
            <input
                type={kind}
                class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                value={value.to_string()}
                {oninput}
            />
        </div>
    }
}

#[function_component(AuthScreen)]
pub fn auth_screen(props: &AuthScreenProps) -> Html {
    let is_login = use_state(|| true);
    let credentials = use_state(Credentials::default);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_submit = {
        let is_login = is_login.clone();
        let credentials = credentials.clone();
        let error = error.clone();
        let loading = loading.clone();
        let api_base = props.api_base.clone();
        let on_authenticated = props.on_authenticated.clone();
        let notify = props.notify.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *loading {
                return;
            }
            let registering = !*is_login;
            let current = (*credentials).clone();
            if let Err(message) = current.validate(registering) {
                error.set(Some(message.to_string()));
                return;
            }

            loading.set(true);
            error.set(None);

            let client = ApiClient::new(api_base.clone(), None);
            let error = error.clone();
            let loading = loading.clone();
            let on_authenticated = on_authenticated.clone();
            let notify = notify.clone();
            spawn_local(async move {
                let result = if registering {
                    client.register(&current.register_request()).await
                } else {
                    client.login(current.user_id.trim(), &current.password).await
                };
                loading.set(false);
                match result {
                    Ok(response) => {
                        let session = Session::store(response);
                        notify.emit(Notice::success(format!("Welcome, {}.", session.user.name)));
                        on_authenticated.emit(session);
                    }
                    Err(err) => {
                        let default = if registering {
                            "Sign up failed."
                        } else {
                            "Login failed. Check your user ID and password."
                        };
                        error.set(Some(err.user_message(default)));
                    }
                }
            });
        })
    };

    let toggle_mode = {
        let is_login = is_login.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            error.set(None);
            is_login.set(!*is_login);
        })
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-background">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <div class="text-center mb-6">
                    <h1 class="text-2xl font-bold text-foreground">{ if *is_login { "Welcome back" } else { "Create account" } }</h1>
                    <p class="text-sm text-muted-foreground mt-2">
                        { if *is_login { "Sign in to your gift ledger." } else { "Start keeping track of gifts." } }
                    </p>
                </div>

                <form class="space-y-4" onsubmit={on_submit}>
                    { credential_input("User ID", "text", &credentials.user_id, &credentials, |c, v| c.user_id = v) }
                    if !*is_login {
                        <>
                            { credential_input("Name", "text", &credentials.name, &credentials, |c, v| c.name = v) }
                            { credential_input("Email", "email", &credentials.email, &credentials, |c, v| c.email = v) }
                        </>
                    }
                    { credential_input("Password", "password", &credentials.password, &credentials, |c, v| c.password = v) }
                    if !*is_login {
                        { credential_input("Confirm Password", "password", &credentials.confirm_password, &credentials, |c, v| c.confirm_password = v) }
                    }

                    if let Some(msg) = &*error {
                        <div class="text-sm text-red-500 whitespace-pre-line">{ msg.clone() }</div>
                    }

                    <button
                        type="submit"
                        class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity"
                        disabled={*loading}
                    >
                        { if *loading { "Please wait..." } else if *is_login { "Login" } else { "Sign up" } }
                    </button>
                </form>

                <div class="mt-6 text-center text-sm text-muted-foreground">
                    { if *is_login { "No account?" } else { "Already have an account?" } }
                    <button class="ml-2 text-primary font-semibold" onclick={toggle_mode}>
                        { if *is_login { "Sign up" } else { "Login" } }
                    </button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled() -> Credentials {
        Credentials {
            user_id: "minji01".into(),
            email: "minji@example.com".into(),
            name: "Minji".into(),
            password: "password1".into(),
            confirm_password: "password1".into(),
        }
    }

    #[test]
    fn login_only_needs_id_and_password() {
        let creds = Credentials {
            user_id: "abc".into(),
            password: "x".into(),
            ..Credentials::default()
        };
        assert_eq!(creds.validate(false), Ok(()));
        assert_eq!(
            Credentials::default().validate(false),
            Err("User ID and password are required.")
        );
    }

    #[test]
    fn registration_checks_every_field() {
        assert_eq!(filled().validate(true), Ok(()));

        let mut short_id = filled();
        short_id.user_id = "abc".into();
        assert_eq!(
            short_id.validate(true),
            Err("User ID must be between 4 and 50 characters.")
        );

        let mut short_password = filled();
        short_password.password = "short".into();
        short_password.confirm_password = "short".into();
        assert_eq!(
            short_password.validate(true),
            Err("Password must be at least 8 characters.")
        );

        let mut mismatch = filled();
        mismatch.confirm_password = "password2".into();
        assert_eq!(mismatch.validate(true), Err("Passwords do not match."));

        let mut bad_email = filled();
        bad_email.email = "minji".into();
        assert_eq!(bad_email.validate(true), Err("Enter a valid email address."));
    }

    #[test]
    fn register_request_trims_text_fields() {
        let mut creds = filled();
        creds.user_id = "  minji01 ".into();
        creds.name = " Minji ".into();
        let request = creds.register_request();
        assert_eq!(request.user_id, "minji01");
        assert_eq!(request.name, "Minji");
        assert_eq!(request.password, "password1");
    }
}
