use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Error,
}

/// A short message for the toast area.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub notice: Option<Notice>,
    pub on_dismiss: Callback<()>,
}

#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    let Some(notice) = &props.notice else {
        return html! {};
    };
    let tone = match notice.kind {
        NoticeKind::Success => "bg-green-600",
        NoticeKind::Info => "bg-[#173E63]",
        NoticeKind::Warning => "bg-yellow-600",
        NoticeKind::Error => "bg-red-600",
    };
    let on_dismiss = props.on_dismiss.reform(|_: MouseEvent| ());

    html! {
        <div class={classes!("fixed", "bottom-6", "right-6", "z-50", "max-w-sm", "text-white", "rounded-xl", "shadow-lg", "px-4", "py-3", "flex", "gap-3", "items-start", tone)}>
            <p class="text-sm whitespace-pre-line flex-1">{ notice.message.clone() }</p>
            <button type="button" class="text-white/80 hover:text-white text-sm" onclick={on_dismiss}>{"×"}</button>
        </div>
    }
}
