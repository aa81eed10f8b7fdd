use contracts::enums::Role;
use contracts::system::users::User;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<User>,
    /// True while a stored token is being validated
    pub restoring: bool,
}

impl AuthState {
    pub fn role(&self) -> Option<Role> {
        self.user_info.as_ref().and_then(User::role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && self.user_info.is_some()
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let initial_token = storage::get_access_token();
    let (auth_state, set_auth_state) = signal(AuthState {
        restoring: initial_token.is_some(),
        ..Default::default()
    });

    // Restore session from localStorage on mount
    Effect::new(move |_| {
        let Some(access_token) = initial_token.clone() else {
            return;
        };
        spawn_local(async move {
            match api::get_current_user().await {
                Ok(user) => {
                    log::info!("session restored for {}", user.email);
                    set_auth_state.set(AuthState {
                        access_token: Some(access_token),
                        user_info: Some(user),
                        restoring: false,
                    });
                }
                Err(e) => {
                    log::warn!("stored token rejected: {}", e);
                    storage::clear_tokens();
                    set_auth_state.set(AuthState::default());
                }
            }
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Role of the signed in viewer, `None` for unknown user types
pub fn current_role() -> Signal<Option<Role>> {
    let (auth_state, _) = use_auth();
    Signal::derive(move || auth_state.with(AuthState::role))
}

/// Helper: Perform login
pub async fn do_login(
    email: String,
    password: String,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<Option<Role>, String> {
    let response = api::login(email, password).await?;
    storage::save_access_token(&response.token);
    let role = response.role();
    if role.is_none() {
        log::warn!("unknown user type '{}'", response.user.user_type);
    }
    set_auth_state.set(AuthState {
        access_token: Some(response.token),
        user_info: Some(response.user),
        restoring: false,
    });
    Ok(role)
}

/// Helper: Perform logout
pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_tokens();
    set_auth_state.set(AuthState::default());
}
