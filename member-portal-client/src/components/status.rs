use leptos::*;

/// Grey pulsing card shown while data is loading
#[component]
pub fn SkeletonCard(cx: Scope, #[prop(default = 3)] lines: usize) -> impl IntoView {
    let lines = (0..lines)
        .map(|_| view! { cx, <div class="skeleton-line"></div> })
        .collect::<Vec<_>>();
    view! { cx,
        <div class="card skeleton">
            <div class="skeleton-title"></div>
            {lines}
        </div>
    }
}

#[component]
pub fn SkeletonGrid(cx: Scope, count: usize) -> impl IntoView {
    let cards = (0..count)
        .map(|_| view! { cx, <SkeletonCard/> })
        .collect::<Vec<_>>();
    view! { cx,
        <div class="card-grid">
            {cards}
        </div>
    }
}

/// Centered panel holding a single message, used for both error and empty states
#[component]
pub fn StatusPanel<S>(cx: Scope, message: S) -> impl IntoView
where
    S: Into<String>,
{
    view! { cx,
        <div class="card status-panel">
            <p>{message.into()}</p>
        </div>
    }
}

/// Inline alert shown above a form
#[component]
pub fn ErrorAlert(cx: Scope, #[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || {
        message.get().map(|message| {
            view! { cx,
                <div class="alert alert-error" role="alert">
                    <strong>"Error! "</strong>
                    <span>{message}</span>
                </div>
            }
        })
    }
}
