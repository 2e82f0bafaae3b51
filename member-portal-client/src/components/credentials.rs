use leptos::*;

/// Labelled input bound to a string signal
#[component]
pub fn CredentialInput(
    cx: Scope,
    id: &'static str,
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    placeholder: &'static str,
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
) -> impl IntoView {
    view! { cx,
        <div class="form-group">
            <label for=id>{label}</label>
            <input
                class="form-control"
                type=input_type
                id=id
                name=id
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| set_value.set(event_target_value(&ev))
            />
        </div>
    }
}

/// Card wrapping the login and register forms. The submit button is disabled and relabelled while
/// `pending` is set.
#[component]
pub fn CredentialsCard<F>(
    cx: Scope,
    title: &'static str,
    submit_label: &'static str,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(into)] pending: Signal<bool>,
    on_submit: F,
    children: Children,
) -> impl IntoView
where
    F: Fn() + 'static,
{
    view! { cx,
        <div class="auth-page">
            <div class="card auth-card">
                <h1>{title}</h1>
                {move || error.get().map(|err| view! { cx, <p class="form-error">{err}</p> })}
                <form on:submit=move |ev| {
                    ev.prevent_default();
                    on_submit();
                }>
                    {children(cx)}
                    <button
                        class="btn btn-primary"
                        type="submit"
                        prop:disabled=move || pending.get()
                    >
                        {move || if pending.get() { "Loading..." } else { submit_label }}
                    </button>
                </form>
            </div>
        </div>
    }
}
