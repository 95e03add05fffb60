//! Auth Panel Component
//!
//! Sign-in and registration forms, Google sign-in and password reset.

use leptos::prelude::*;
use leptos::task::spawn_local;
use taskty_core::ButtonId;

use super::LoadingButton;
use crate::context::use_app_context;
use crate::store::{use_ui_store, UiStateStoreFields};

#[component]
pub fn AuthPanel() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();
    let (registering, set_registering) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let auth = ctx.auth();
        let name = store.auth_name().get_untracked();
        let email = store.auth_email().get_untracked();
        let password = store.auth_password().get_untracked();
        let register = registering.get_untracked();

        spawn_local(async move {
            if register {
                auth.register(&name, &email, &password).await;
            } else {
                auth.login(&email, &password).await;
            }
        });
    };

    let google = Callback::new(move |_: ()| {
        let auth = ctx.auth();
        spawn_local(async move {
            auth.login_with_google().await;
        });
    });

    let reset = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        let auth = ctx.auth();
        let email = store.auth_email().get_untracked();
        spawn_local(async move {
            auth.reset_password(&email).await;
        });
    };

    view! {
        <section class="auth-section">
            <h1>"📝 Taskty"</h1>
            <form class="auth-form" on:submit=submit>
                <Show when=move || registering.get()>
                    <input
                        type="text"
                        placeholder="Full name"
                        prop:value=move || store.auth_name().get()
                        on:input=move |ev| store.auth_name().set(event_target_value(&ev))
                    />
                </Show>
                <input
                    type="email"
                    placeholder="Email"
                    prop:value=move || store.auth_email().get()
                    on:input=move |ev| store.auth_email().set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || store.auth_password().get()
                    on:input=move |ev| store.auth_password().set(event_target_value(&ev))
                />
                {move || if registering.get() {
                    view! { <LoadingButton button=ButtonId::Register label="Create Account" class="btn btn-primary" /> }.into_any()
                } else {
                    view! { <LoadingButton button=ButtonId::Login label="Sign In" class="btn btn-primary" /> }.into_any()
                }}
            </form>

            <LoadingButton
                button=ButtonId::GoogleLogin
                label="Continue with Google"
                class="btn btn-google"
                on_click=google
            />

            <div class="auth-links">
                <Show when=move || !registering.get()>
                    <a href="#" class="reset-link" on:click=reset>"Forgot password?"</a>
                </Show>
                <a
                    href="#"
                    class="toggle-link"
                    on:click=move |ev: web_sys::MouseEvent| {
                        ev.prevent_default();
                        set_registering.update(|r| *r = !*r);
                    }
                >
                    {move || if registering.get() {
                        "Already have an account? Sign in"
                    } else {
                        "Don't have an account? Register"
                    }}
                </a>
            </div>
        </section>
    }
}
