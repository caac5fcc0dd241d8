//! Shared view pieces: route guard, toasts, navigation, and content cards.
#![allow(clippy::clone_on_copy)]

use std::time::Duration;

use catalog_api::ContentItem;
use catalog_runtime::{
    decide, use_catalog, AuthGuard, GuardDecision, MyListHandle, Toast, WatchHistoryHandle,
};
use leptos::*;
use leptos_router::*;

#[component]
pub fn LoadingPlaceholder() -> impl IntoView {
    view! {
        <div class="loading-screen">
            <div class="loading-text">"Loading..."</div>
        </div>
    }
}

/// Renders `children` only for an authenticated session.
///
/// Hydration is requested once per mount; a hydrated signed-out session is redirected to the
/// login route while the placeholder stays on screen.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let runtime = use_catalog();
    let guard = store_value(AuthGuard::new(runtime.config().auth.login_route.clone()));
    let navigate = use_navigate();

    create_effect(move |_| {
        let state = runtime.session.get();
        match guard.with_value(|guard| guard.evaluate(&state)) {
            GuardDecision::Hydrating {
                start_hydration: true,
            } => runtime.session_container().hydrate(),
            GuardDecision::Redirect { to } => navigate(
                &to,
                NavigateOptions {
                    replace: true,
                    ..NavigateOptions::default()
                },
            ),
            GuardDecision::Hydrating { .. } | GuardDecision::Render => {}
        }
    });

    let authorized = move || {
        runtime
            .session
            .with(|state| decide(state, true, "").renders_children())
    };

    view! {
        <Show when=authorized fallback=|| view! { <LoadingPlaceholder /> }>
            <Navigation />
            {children()}
        </Show>
    }
}

#[component]
pub fn Navigation() -> impl IntoView {
    let runtime = use_catalog();
    let navigate = use_navigate();
    let display_name = move || {
        runtime.session.with(|state| {
            state
                .user
                .as_ref()
                .map(|user| user.name.clone().unwrap_or_else(|| user.email.clone()))
                .unwrap_or_default()
        })
    };

    let sign_out = move |_| {
        runtime.session_container().sign_out();
        navigate(&runtime.config().auth.login_route, NavigateOptions::default());
    };

    view! {
        <nav class="site-nav">
            <A href="/" class="brand">"Zenithflix"</A>
            <A href="/">"Home"</A>
            <A href="/trending">"Trending"</A>
            <A href="/my-list">"My List"</A>
            <span class="spacer"></span>
            <A href="/profile" class="nav-user">{display_name}</A>
            <button type="button" class="nav-sign-out" on:click=sign_out>
                "Sign out"
            </button>
        </nav>
    }
}

#[component]
fn ToastItem(toast: Toast) -> impl IntoView {
    let runtime = use_catalog();
    let id = toast.id;
    let dismiss = move || {
        runtime
            .services
            .with_value(|services| services.toasts.dismiss(id));
    };

    set_timeout(dismiss, Duration::from_millis(u64::from(toast.duration_ms)));

    view! {
        <div class=format!("toast toast-{}", toast.kind.as_str()) role="status">
            <span class="toast-message">{toast.message}</span>
            <button type="button" class="toast-close" on:click=move |_| dismiss()>
                "×"
            </button>
        </div>
    }
}

/// Renders active toasts; each removes itself after its duration.
#[component]
pub fn ToastContainer() -> impl IntoView {
    let runtime = use_catalog();

    view! {
        <div class="toast-container">
            <For each=move || runtime.toasts.get() key=|toast| toast.id let:toast>
                <ToastItem toast=toast />
            </For>
        </div>
    }
}

#[component]
pub fn ContentCard(
    item: ContentItem,
    history: WatchHistoryHandle,
    my_list: MyListHandle,
) -> impl IntoView {
    let id = store_value(item.id.clone());
    let progress = move || id.with_value(|id| history.progress(id));
    let in_list = move || id.with_value(|id| my_list.is_in_list(id));
    let toggle = move |_| {
        id.with_value(|id| {
            my_list.toggle(id);
        })
    };
    let meta = [
        item.year.map(|year| year.to_string()),
        item.rating.map(|rating| format!("★ {rating:.1}")),
        item.duration.map(|minutes| format!("{minutes} min")),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" · ");

    view! {
        <article class="content-card">
            <A href=format!("/watch/{}", item.id) class="content-card-link">
                <img
                    class="content-thumb"
                    src=item.thumbnail_url.unwrap_or_default()
                    alt=item.title.clone()
                    loading="lazy"
                />
                <h3 class="content-title">{item.title}</h3>
            </A>
            <p class="content-meta">{meta}</p>
            <Show when=move || { progress() > 0.0 }>
                <div class="content-progress">
                    <div
                        class="content-progress-bar"
                        style=move || format!("width: {}%", progress().clamp(0.0, 100.0))
                    ></div>
                </div>
            </Show>
            <button type="button" class="content-list-toggle" on:click=toggle>
                {move || if in_list() { "✓ My List" } else { "+ My List" }}
            </button>
        </article>
    }
}

#[component]
pub fn ContentGrid(
    #[prop(into)] items: Signal<Vec<ContentItem>>,
    history: WatchHistoryHandle,
    my_list: MyListHandle,
    #[prop(into)] empty_text: String,
) -> impl IntoView {
    let empty_text = store_value(empty_text);

    view! {
        <Show
            when=move || items.with(|items| !items.is_empty())
            fallback=move || view! { <p class="no-results">{empty_text.get_value()}</p> }
        >
            <div class="content-grid">
                <For each=move || items.get() key=|item| item.id.clone() let:item>
                    <ContentCard item=item history=history my_list=my_list />
                </For>
            </div>
        </Show>
    }
}
