//! Route views.
#![allow(clippy::clone_on_copy)]

use std::time::Duration;

use catalog_api::{ApiError, ContentApi, ContentItem, ProfileUpdate};
use catalog_runtime::{
    format_time, registration_error_message, use_cancel_scope, use_catalog, use_my_list,
    use_watch_history, validate_login, validate_password_change, validate_register,
    PlaybackSimulator, SessionError, ToastKind,
};
use leptos::*;
use leptos_router::*;

use crate::components::ContentGrid;

type ContentList = Result<Vec<ContentItem>, ApiError>;

fn content_resource(search: Signal<String>) -> Resource<String, ContentList> {
    let runtime = use_catalog();
    create_local_resource(
        move || search.get(),
        move |search| {
            let content = runtime
                .services
                .with_value(|services| services.content.clone());
            async move { content.fetch_all(Some(&search)).await }
        },
    )
}

fn loaded_items(resource: Resource<String, ContentList>) -> Signal<Vec<ContentItem>> {
    Signal::derive(move || {
        resource
            .get()
            .and_then(Result::ok)
            .unwrap_or_default()
    })
}

fn load_error(resource: Resource<String, ContentList>) -> Signal<Option<String>> {
    Signal::derive(move || {
        resource
            .get()
            .and_then(Result::err)
            .map(|err| err.to_string())
    })
}

#[component]
fn FormError(#[prop(into)] error: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || error.with(Option::is_some)>
            <p class="form-error" role="alert">{move || error.get().unwrap_or_default()}</p>
        </Show>
    }
}

#[component]
fn AuthLayout(#[prop(into)] title: String, children: Children) -> impl IntoView {
    view! {
        <section class="auth-layout">
            <div class="auth-card">
                <h1 class="auth-brand">"Zenithflix"</h1>
                <h2 class="auth-title">{title}</h2>
                {children()}
            </div>
        </section>
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let runtime = use_catalog();
    let scope = store_value(use_cancel_scope());
    let navigate = use_navigate();
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let error = create_rw_signal(None::<String>);
    let loading = move || runtime.session.with(|state| state.loading);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let config = runtime.config();
        let request = match validate_login(
            &email.get_untracked(),
            &password.get_untracked(),
            &config.auth,
        ) {
            Ok(request) => request,
            Err(err) => {
                error.set(Some(err.message(&config.auth)));
                return;
            }
        };
        error.set(None);

        let session = runtime.session_container();
        let scope = scope.get_value();
        let navigate = navigate.clone();
        let home = config.auth.home_route.clone();
        spawn_local(async move {
            match session.login(&scope, request).await {
                Ok(_) => navigate(&home, NavigateOptions::default()),
                Err(err) if err.is_cancellation() => {}
                Err(err) => error.set(Some(err.to_string())),
            }
        });
    };

    view! {
        <AuthLayout title="Sign In">
            <form class="auth-form" on:submit=on_submit>
                <input
                    type="email"
                    placeholder="Email"
                    autocomplete="email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    autocomplete="current-password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <FormError error=error />
                <button type="submit" class="auth-submit" disabled=loading>
                    {move || if loading() { "Signing in..." } else { "Sign In" }}
                </button>
            </form>
            <p class="auth-switch">
                <span>"New to Zenithflix? "</span>
                <A href="/register">"Sign up now"</A>
            </p>
        </AuthLayout>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let runtime = use_catalog();
    let scope = store_value(use_cancel_scope());
    let navigate = use_navigate();
    let name = create_rw_signal(String::new());
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let error = create_rw_signal(None::<String>);
    let loading = move || runtime.session.with(|state| state.loading);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let config = runtime.config();
        let request = match validate_register(
            &email.get_untracked(),
            &password.get_untracked(),
            &name.get_untracked(),
            &config.auth,
        ) {
            Ok(request) => request,
            Err(err) => {
                error.set(Some(err.message(&config.auth)));
                return;
            }
        };
        error.set(None);

        let session = runtime.session_container();
        let scope = scope.get_value();
        let navigate = navigate.clone();
        spawn_local(async move {
            match session.register(&scope, request).await {
                Ok(_) => navigate(&config.auth.home_route, NavigateOptions::default()),
                Err(err) if err.is_cancellation() => {}
                Err(err) => error.set(Some(registration_error_message(
                    &err.to_string(),
                    &config.auth,
                ))),
            }
        });
    };

    view! {
        <AuthLayout title="Create Account">
            <form class="auth-form" on:submit=on_submit>
                <input
                    type="text"
                    placeholder="Name"
                    autocomplete="name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <input
                    type="email"
                    placeholder="Email"
                    autocomplete="email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    autocomplete="new-password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <FormError error=error />
                <button type="submit" class="auth-submit" disabled=loading>
                    {move || if loading() { "Creating account..." } else { "Sign Up" }}
                </button>
            </form>
            <p class="auth-switch">
                <span>"Already have an account? "</span>
                <A href="/login">"Sign in"</A>
            </p>
        </AuthLayout>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let history = use_watch_history();
    let my_list = use_my_list();
    let search = create_rw_signal(String::new());
    let content = content_resource(search.into());
    let items = loaded_items(content);
    let continue_watching = Signal::derive(move || {
        items
            .get()
            .into_iter()
            .filter(|item| {
                let progress = history.progress(&item.id);
                progress > 0.0 && progress < 100.0
            })
            .collect::<Vec<_>>()
    });

    view! {
        <section class="page page-home">
            <input
                type="search"
                class="search-input"
                placeholder="Search titles, genres, cast"
                prop:value=move || search.get()
                on:input=move |ev| search.set(event_target_value(&ev))
            />
            <FormError error=load_error(content) />
            <Show when=move || !continue_watching.with(Vec::is_empty)>
                <h2 class="row-title">"Continue Watching"</h2>
                <ContentGrid
                    items=continue_watching
                    history=history
                    my_list=my_list
                    empty_text=""
                />
            </Show>
            <h2 class="row-title">"All Titles"</h2>
            <Show
                when=move || !content.loading().get()
                fallback=|| view! { <p class="loading-text">"Loading..."</p> }
            >
                <ContentGrid
                    items=items
                    history=history
                    my_list=my_list
                    empty_text="No titles match your search."
                />
            </Show>
        </section>
    }
}

#[component]
pub fn TrendingPage() -> impl IntoView {
    let history = use_watch_history();
    let my_list = use_my_list();
    let content = content_resource(Signal::derive(String::new));
    let items = loaded_items(content);
    let trending = Signal::derive(move || {
        let mut items = items.get();
        items.sort_by(|a, b| {
            b.rating
                .unwrap_or(0.0)
                .total_cmp(&a.rating.unwrap_or(0.0))
        });
        items
    });

    view! {
        <section class="page page-trending">
            <h1 class="page-title">"Trending Now"</h1>
            <FormError error=load_error(content) />
            <ContentGrid
                items=trending
                history=history
                my_list=my_list
                empty_text="Nothing is trending right now."
            />
        </section>
    }
}

#[component]
pub fn MyListPage() -> impl IntoView {
    let history = use_watch_history();
    let my_list = use_my_list();
    let content = content_resource(Signal::derive(String::new));
    let items = loaded_items(content);
    let saved = Signal::derive(move || {
        let items = items.get();
        my_list
            .ids()
            .into_iter()
            .filter_map(|id| items.iter().find(|item| item.id == id).cloned())
            .collect::<Vec<_>>()
    });

    view! {
        <section class="page page-my-list">
            <h1 class="page-title">"My List"</h1>
            <FormError error=load_error(content) />
            <ContentGrid
                items=saved
                history=history
                my_list=my_list
                empty_text="Your list is empty. Add titles to watch them later."
            />
        </section>
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let runtime = use_catalog();
    let scope = store_value(use_cancel_scope());
    let user = runtime.session.get_untracked().user;
    let name = create_rw_signal(
        user.as_ref()
            .and_then(|user| user.name.clone())
            .unwrap_or_default(),
    );
    let email = create_rw_signal(user.as_ref().map(|user| user.email.clone()).unwrap_or_default());
    let avatar = create_rw_signal(
        user.as_ref()
            .and_then(|user| user.profile_image.clone())
            .unwrap_or_default(),
    );
    let current_password = create_rw_signal(String::new());
    let new_password = create_rw_signal(String::new());
    let confirm_password = create_rw_signal(String::new());
    let error = create_rw_signal(None::<String>);
    let saving = create_rw_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let config = runtime.config();
        let password_change = match validate_password_change(
            &current_password.get_untracked(),
            &new_password.get_untracked(),
            &confirm_password.get_untracked(),
        ) {
            Ok(change) => change,
            Err(err) => {
                error.set(Some(err.message(&config.auth)));
                return;
            }
        };
        let session = runtime.session_container();
        let Some(current) = session.user() else {
            error.set(Some(config.auth.not_authenticated.clone()));
            return;
        };
        let update = ProfileUpdate::diff(
            &current,
            &name.get_untracked(),
            &email.get_untracked(),
            &avatar.get_untracked(),
        );
        error.set(None);
        saving.set(true);

        let scope = scope.get_value();
        spawn_local(async move {
            let mut result: Result<(), SessionError> = Ok(());
            if let Some(update) = update {
                result = session.update_profile(&scope, update).await.map(|_| ());
            }
            if let Some(change) = password_change.filter(|_| result.is_ok()) {
                result = session.change_password(&scope, change).await;
            }

            match result {
                Err(err) if err.is_cancellation() => return,
                Err(err) => error.set(Some(err.to_string())),
                Ok(()) => {
                    current_password.set(String::new());
                    new_password.set(String::new());
                    confirm_password.set(String::new());
                    runtime.services.with_value(|services| {
                        services
                            .toasts
                            .show("Profile updated", ToastKind::Success, None);
                    });
                }
            }
            saving.set(false);
        });
    };

    view! {
        <section class="page page-profile">
            <h1 class="page-title">"Profile"</h1>
            <form class="profile-form" on:submit=on_submit>
                <Show when=move || !avatar.with(String::is_empty)>
                    <img class="avatar-preview" src=move || avatar.get() alt="Avatar" />
                </Show>
                <label>
                    "Name"
                    <input
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Email"
                    <input
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Avatar URL"
                    <input
                        type="url"
                        prop:value=move || avatar.get()
                        on:input=move |ev| avatar.set(event_target_value(&ev))
                    />
                </label>
                <h2 class="form-section">"Change Password"</h2>
                <input
                    type="password"
                    placeholder="Current password"
                    autocomplete="current-password"
                    prop:value=move || current_password.get()
                    on:input=move |ev| current_password.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="New password"
                    autocomplete="new-password"
                    prop:value=move || new_password.get()
                    on:input=move |ev| new_password.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Confirm new password"
                    autocomplete="new-password"
                    prop:value=move || confirm_password.get()
                    on:input=move |ev| confirm_password.set(event_target_value(&ev))
                />
                <FormError error=error />
                <button type="submit" class="profile-save" disabled=move || saving.get()>
                    {move || if saving.get() { "Saving..." } else { "Save Changes" }}
                </button>
            </form>
        </section>
    }
}

#[component]
pub fn WatchPage() -> impl IntoView {
    let runtime = use_catalog();
    let history = use_watch_history();
    let params = use_params_map();
    let content_id = move || params.with(|map| map.get("id").cloned().unwrap_or_default());
    let item = create_local_resource(content_id, move |id| {
        let content = runtime
            .services
            .with_value(|services| services.content.clone());
        async move { content.fetch_by_id(&id).await }
    });
    let player = create_rw_signal(PlaybackSimulator::default());

    create_effect(move |_| {
        let id = content_id();
        let resumed = untrack(|| history.progress(&id));
        player.set(PlaybackSimulator::resume_from(resumed));
    });

    let simulated = move || {
        untrack(move || matches!(item.get(), Some(Ok(item)) if item.video_url.is_none()))
    };

    if let Ok(interval) = set_interval_with_handle(
        move || {
            if !simulated() || !player.with_untracked(PlaybackSimulator::is_playing) {
                return;
            }
            let mut reported = None;
            player.update(|player| reported = player.tick());
            if let Some(progress) = reported {
                let id = params.with_untracked(|map| map.get("id").cloned().unwrap_or_default());
                history.update_progress(&id, progress);
            }
        },
        Duration::from_secs(1),
    ) {
        on_cleanup(move || interval.clear());
    }

    let on_time_update = move |ev: ev::Event| {
        let media = event_target::<web_sys::HtmlMediaElement>(&ev);
        let duration = media.duration();
        if duration.is_finite() && duration > 0.0 {
            let id = params.with_untracked(|map| map.get("id").cloned().unwrap_or_default());
            history.update_progress(&id, media.current_time() / duration * 100.0);
        }
    };

    let on_seek = move |ev: ev::Event| {
        let Ok(position) = event_target_value(&ev).parse::<u32>() else {
            return;
        };
        player.update(|player| player.seek(position));
        let id = params.with_untracked(|map| map.get("id").cloned().unwrap_or_default());
        history.update_progress(&id, f64::from(player.with_untracked(PlaybackSimulator::position)));
    };

    let player_view = move |content: ContentItem| match content.video_url.clone() {
        Some(url) => view! {
            <video class="video-element" src=url controls=true autoplay=true on:timeupdate=on_time_update></video>
        }
        .into_view(),
        None => view! {
            <div class="simulated-player">
                <h2 class="player-title">{content.title}</h2>
                <input
                    type="range"
                    class="player-seek"
                    min="0"
                    max=catalog_runtime::player::SIMULATED_DURATION
                    prop:value=move || player.with(PlaybackSimulator::position).to_string()
                    on:input=on_seek
                />
                <div class="player-controls">
                    <button type="button" on:click=move |_| player.update(PlaybackSimulator::toggle)>
                        {move || if player.with(PlaybackSimulator::is_playing) { "Pause" } else { "Play" }}
                    </button>
                    <span class="player-time">
                        {move || format!(
                            "{} / {}",
                            format_time(player.with(PlaybackSimulator::position)),
                            format_time(catalog_runtime::player::SIMULATED_DURATION),
                        )}
                    </span>
                </div>
            </div>
        }
        .into_view(),
    };

    view! {
        <section class="page page-watch">
            <A href="/" class="player-close">"← Back"</A>
            {move || match item.get() {
                None => view! { <p class="loading-text">"Loading..."</p> }.into_view(),
                Some(Err(err)) => view! { <p class="form-error">{err.to_string()}</p> }.into_view(),
                Some(Ok(content)) => player_view(content),
            }}
        </section>
    }
}
