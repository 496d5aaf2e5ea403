//! Loading spinner component

use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct SpinnerProps {
    #[prop_or_default]
    pub text: Option<String>,
}

#[function_component(LoadingSpinner)]
pub fn loading_spinner(props: &SpinnerProps) -> Html {
    html! {
        <div class="inline-flex items-center gap-2" role="status" aria-live="polite">
            <div class="w-4 h-4 border-2 border-gray-200 dark:border-gray-700 border-t-blue-500 dark:border-t-blue-400 rounded-full animate-spin"></div>
            if let Some(text) = &props.text {
                <span class="text-gray-600 dark:text-gray-400 text-sm">{text}</span>
            }
        </div>
    }
}
