use anyhow::Result;

use super::super::Container;

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn chat(&self, words: Vec<String>) -> Result<String> {
        let message = words.join(" ");

        let use_case = self.container.chat_use_case();
        let reply = use_case.execute(&message).await?;

        Ok(self.format_reply(&reply))
    }

    fn format_reply(&self, reply: &str) -> String {
        format!("Response from API: {}", reply)
    }
}
