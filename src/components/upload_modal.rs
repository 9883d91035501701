use wasm_bindgen_futures::spawn_local;
use web_sys::{File, HtmlInputElement};
use yew::prelude::*;

use super::Notice;
use crate::app::AppContext;
use crate::error::UploadError;
use crate::models::UploadResponse;
use crate::upload::check_upload;

#[derive(Properties, PartialEq)]
pub struct UploadModalProps {
    pub on_close: Callback<()>,
    /// Fired after the backend accepted a file, so lists can reload.
    pub on_uploaded: Callback<()>,
}

fn chosen_file(input: &NodeRef) -> Result<File, UploadError> {
    let file = input
        .cast::<HtmlInputElement>()
        .and_then(|input| input.files())
        .and_then(|files| files.get(0))
        .ok_or(UploadError::NoFile)?;
    check_upload(&file.name(), file.size())?;
    Ok(file)
}

#[function_component(UploadModal)]
pub fn upload_modal(props: &UploadModalProps) -> Html {
    let ctx = use_context::<AppContext>();
    let file_input = use_node_ref();
    let uploading = use_state(|| false);
    let problem = use_state(|| None::<String>);
    let result = use_state(|| None::<UploadResponse>);

    let Some(ctx) = ctx else {
        return html! {};
    };

    let on_submit = {
        let file_input = file_input.clone();
        let uploading = uploading.clone();
        let problem = problem.clone();
        let result = result.clone();
        let ctx = ctx.clone();
        let on_uploaded = props.on_uploaded.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *uploading {
                return;
            }
            let file = match chosen_file(&file_input) {
                Ok(file) => file,
                Err(err) => {
                    problem.set(Some(err.to_string()));
                    return;
                }
            };

            problem.set(None);
            result.set(None);
            uploading.set(true);
            let ctx = ctx.clone();
            let uploading = uploading.clone();
            let result = result.clone();
            let on_uploaded = on_uploaded.clone();
            spawn_local(async move {
                let outcome = ctx.client().upload_gifts(&file).await;
                uploading.set(false);
                match outcome {
                    Ok(response) => {
                        ctx.notify.emit(Notice::success(response.summary()));
                        result.set(Some(response));
                        on_uploaded.emit(());
                    }
                    Err(err) => ctx.report(err, "Upload failed."),
                }
            });
        })
    };

    let on_close = props.on_close.reform(|_: MouseEvent| ());
    let template_url = ctx.client().template_url();

    html! {
        <div class="fixed inset-0 z-40 bg-black/40 flex items-center justify-center p-4">
            <form class="w-full max-w-lg bg-white rounded-[10px] shadow-lg p-6 space-y-4" onsubmit={on_submit}>
                <div class="flex items-center justify-between">
                    <h4 class="text-[#1D617A] font-bold text-[15px] tracking-wider">{"Import from Excel"}</h4>
                    <button type="button" class="text-muted-foreground" onclick={on_close.clone()}>{"×"}</button>
                </div>

                <p class="text-[12px] text-muted-foreground">
                    {"Columns: event_date, event_type, giver_name, giver_relation, amount, contact, memo. "}
                    <a href={template_url} download="gift_money_template.csv" class="text-[#1D617A] font-bold underline">
                        {"Download the template"}
                    </a>
                </p>

                <input
                    ref={file_input}
                    type="file"
                    accept=".xlsx,.xls"
                    class="w-full text-[13px] text-[#173E63]"
                />

                if let Some(message) = &*problem {
                    <p class="text-[12px] text-red-600">{ message.clone() }</p>
                }

                if let Some(done) = &*result {
                    <div class="bg-[#f1f4f9] rounded-[10px] p-3 text-[12px] space-y-1">
                        <p class="font-bold text-[#173E63]">{ done.summary() }</p>
                        { for done.errors.iter().map(|row| html! {
                            <p class="text-red-700">{ format!("Row {}: {}", row.row, row.reason) }</p>
                        }) }
                    </div>
                }

                <div class="flex gap-3">
                    <button type="submit" class="flex-1 bg-[#173E63] text-white py-2 rounded-[10px] text-[12px] font-bold" disabled={*uploading}>
                        { if *uploading { "Uploading..." } else { "Upload" } }
                    </button>
                    <button type="button" onclick={on_close} class="flex-1 bg-[#B2CBDE] text-[#173E63] py-2 rounded-[10px] text-[12px] font-bold">{"Close"}</button>
                </div>
            </form>
        </div>
    }
}
