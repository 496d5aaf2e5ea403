//! Signed-in user summary with a sign-out action

use super::Spinner;
use crate::auth::use_auth;
use authstate_core::UserInfo;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct UserMenuProps {
    /// Target of the sign-in link shown to signed-out visitors
    #[prop_or_else(|| "/login".to_string())]
    pub sign_in_href: String,
}

/// Name shown in the menu; falls back to the email when the profile has no name
fn display_label(user: &UserInfo) -> &str {
    if user.name.is_empty() {
        &user.email
    } else {
        &user.name
    }
}

#[function_component(UserMenu)]
pub fn user_menu(props: &UserMenuProps) -> Html {
    let auth = use_auth();

    let on_sign_out = {
        let auth = auth.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            auth.sign_out();
        })
    };

    let state = &auth.auth_state;
    if state.is_loading() && !state.is_authenticated() {
        return html! { <Spinner /> };
    }

    match state.user() {
        Some(user) => html! {
            <div class="flex items-center gap-3">
                <div class="flex flex-col text-right">
                    <span class="text-sm font-medium text-gray-900 dark:text-white">
                        {display_label(user).to_string()}
                    </span>
                    if !user.name.is_empty() && !user.email.is_empty() {
                        <span class="text-xs text-gray-500 dark:text-gray-400">{user.email.clone()}</span>
                    }
                </div>
                <button
                    class="px-3 py-1 text-sm rounded border border-gray-300 dark:border-gray-600 hover:bg-gray-100 dark:hover:bg-gray-700"
                    onclick={on_sign_out}
                >
                    {"Sign out"}
                </button>
            </div>
        },
        None => html! {
            <a class="text-sm text-blue-600 dark:text-blue-400 hover:underline" href={props.sign_in_href.clone()}>
                {"Sign in"}
            </a>
        },
    }
}
