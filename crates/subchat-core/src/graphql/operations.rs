//! GraphQL documents sent to the Hasura endpoint.
//!
//! Row-level security on the server scopes every query to the signed-in
//! user, so none of these filter by owner.

use super::Operation;

pub const GET_CHATS: Operation = Operation {
    name: "GetChats",
    document: r"query GetChats {
  chats(order_by: { created_at: desc }) {
    id
    title
    created_at
  }
}",
};

pub const GET_MESSAGES: Operation = Operation {
    name: "GetMessages",
    document: r"query GetMessages($chat_id: uuid!) {
  messages(where: { chat_id: { _eq: $chat_id } }, order_by: { created_at: asc }) {
    id
    content
    role
    created_at
  }
}",
};

pub const CREATE_CHAT: Operation = Operation {
    name: "CreateChat",
    document: r"mutation CreateChat($title: String!) {
  insert_chats_one(object: { title: $title }) {
    id
  }
}",
};

pub const UPDATE_CHAT_TITLE: Operation = Operation {
    name: "UpdateChatTitle",
    document: r"mutation UpdateChatTitle($id: uuid!, $title: String!) {
  update_chats_by_pk(pk_columns: { id: $id }, _set: { title: $title }) {
    id
    title
    created_at
  }
}",
};

pub const DELETE_CHAT: Operation = Operation {
    name: "DeleteChat",
    document: r"mutation DeleteChat($id: uuid!) {
  delete_chats_by_pk(id: $id) {
    id
  }
}",
};
