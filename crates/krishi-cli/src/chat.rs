use std::sync::Arc;

use krishi_client::BackendClient;
use krishi_flow::ChatSession;

use crate::render;

pub(crate) async fn run_chat(client: Arc<BackendClient>, prompt: &str) -> anyhow::Result<()> {
    let mut chat = ChatSession::new(client);
    let reply = chat.send(prompt).await.map(str::to_string);
    render::notices(&chat.take_notices());
    match reply {
        Some(reply) => {
            render::sections(&krishi_core::parse_sections(&reply));
            Ok(())
        }
        None => anyhow::bail!("no reply from the assistant"),
    }
}
