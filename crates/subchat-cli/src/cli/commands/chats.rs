//! Chat command handlers.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Error, Result, anyhow, bail};
use chrono::Local;
use comfy_table::{ContentArrangement, Table};
use subchat_core::auth::{AuthClient, SessionStore, restore_session};
use subchat_core::chats::{ChatCollection, ChatId, ChatsClient, ChatsError, default_chat_title};
use subchat_core::config::Config;
use subchat_core::graphql::GraphqlClient;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Chat client carrying the stored (refreshed if needed) session token.
async fn authorized_client(config: &Config) -> Result<ChatsClient> {
    let auth = AuthClient::new(config.backend.auth_url()?);
    let session = restore_session(&SessionStore::default(), &auth)
        .await
        .context("restore session")?
        .context("Not signed in. Run `subchat login` first.")?;
    let graphql =
        GraphqlClient::new(config.backend.graphql_url()?).with_access_token(session.access_token);
    Ok(ChatsClient::new(graphql))
}

/// Adds a sign-in hint to rejected-token errors.
fn request_error(err: ChatsError, action: &str) -> Error {
    if err.is_unauthorized() {
        anyhow!("{action}: {err}. Run `subchat login` to sign in again.")
    } else {
        Error::new(err).context(action.to_string())
    }
}

/// Full ids skip the round trip; prefixes are matched against the list.
async fn resolve_chat(client: &ChatsClient, id: &str) -> Result<(ChatId, ChatCollection)> {
    let chats = client
        .list_chats()
        .await
        .map_err(|e| request_error(e, "list chats"))?;
    let collection = ChatCollection::new(chats);
    let id = match id.parse::<ChatId>() {
        Ok(id) => id,
        Err(_) => collection.resolve_prefix(id).map_err(|msg| anyhow!(msg))?,
    };
    Ok((id, collection))
}

fn chats_table(collection: &ChatCollection) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(["ID", "Title", "Created"]);
    for chat in collection {
        table.add_row([
            chat.id.short(),
            chat.title.clone(),
            chat.created_at.with_timezone(&Local).format(TIME_FORMAT).to_string(),
        ]);
    }
    table
}

pub async fn list(config: &Config) -> Result<()> {
    let client = authorized_client(config).await?;
    let chats = client
        .list_chats()
        .await
        .map_err(|e| request_error(e, "list chats"))?;
    if chats.is_empty() {
        println!("No chats yet. Start a new one with `subchat chats create`.");
        return Ok(());
    }
    println!("{}", chats_table(&ChatCollection::new(chats)));
    Ok(())
}

pub async fn create(config: &Config, title: Option<&str>) -> Result<()> {
    let title = title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map_or_else(|| default_chat_title(Local::now()), str::to_string);

    let client = authorized_client(config).await?;
    let id = client
        .create_chat(&title)
        .await
        .map_err(|e| request_error(e, "create chat"))?;
    println!("New chat created! {id}  {title}");
    Ok(())
}

/// Renames a chat. The title is sent as given once it is known to be non-blank.
pub async fn rename(config: &Config, id: &str, title: &str) -> Result<()> {
    if title.trim().is_empty() {
        bail!("Title cannot be empty");
    }

    let client = authorized_client(config).await?;
    let id = match id.parse::<ChatId>() {
        Ok(id) => id,
        Err(_) => resolve_chat(&client, id).await?.0,
    };
    let chat = client
        .update_chat_title(id, title)
        .await
        .map_err(|e| request_error(e, "rename chat"))?;
    println!("Renamed chat {} → {}", chat.id.short(), chat.title);
    Ok(())
}

pub async fn delete(config: &Config, id: &str, yes: bool) -> Result<()> {
    let client = authorized_client(config).await?;
    let (id, collection) = resolve_chat(&client, id).await?;

    if !yes {
        let title = collection.get(id).map_or("this chat", |c| c.title.as_str());
        if !confirm(&format!("Delete \"{title}\" and all of its messages? [y/N] "))? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    client
        .delete_chat(id)
        .await
        .map_err(|e| request_error(e, "delete chat"))?;
    println!("Chat deleted! {id}");
    Ok(())
}

pub async fn messages(config: &Config, id: &str) -> Result<()> {
    let client = authorized_client(config).await?;
    let id = match id.parse::<ChatId>() {
        Ok(id) => id,
        Err(_) => resolve_chat(&client, id).await?.0,
    };
    let messages = client
        .list_messages(id)
        .await
        .map_err(|e| request_error(e, "load messages"))?;
    if messages.is_empty() {
        println!("No messages yet.");
        return Ok(());
    }
    for message in messages {
        println!(
            "[{}] {}: {}",
            message.created_at.with_timezone(&Local).format(TIME_FORMAT),
            message.role.label(),
            message.content
        );
    }
    Ok(())
}

/// Reads a y/N answer from stdin. Anything but `y` declines.
fn confirm(prompt: &str) -> Result<bool> {
    let mut err = io::stderr();
    write!(err, "{prompt}")?;
    err.flush()?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("read confirmation")?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use subchat_core::chats::Conversation;

    use super::*;

    #[test]
    fn test_is_yes_accepts_only_y() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" Y "));
        assert!(!is_yes(""));
        assert!(!is_yes("yes"));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn test_chats_table_lists_short_ids_newest_first() {
        let older = Conversation {
            id: "11111111-1111-4111-8111-111111111111".parse().unwrap(),
            title: "Older".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        };
        let newer = Conversation {
            id: "22222222-2222-4222-8222-222222222222".parse().unwrap(),
            title: "Newer".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap(),
        };
        let rendered = chats_table(&ChatCollection::new(vec![older, newer])).to_string();

        assert!(rendered.contains("22222222"));
        assert!(!rendered.contains("22222222-2222"));
        let newer_at = rendered.find("Newer").unwrap();
        let older_at = rendered.find("Older").unwrap();
        assert!(newer_at < older_at);
    }
}
