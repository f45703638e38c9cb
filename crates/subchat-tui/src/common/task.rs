#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    ChatList,
    ChatCreate,
    ChatRename,
    ChatDelete,
    Messages,
    SignIn,
    SignUp,
    SignOut,
    SessionRefresh,
}

impl TaskKind {
    /// How completions of this kind are gated.
    pub fn policy(self) -> TaskPolicy {
        match self {
            TaskKind::ChatList
            | TaskKind::Messages
            | TaskKind::SignIn
            | TaskKind::SignUp
            | TaskKind::SessionRefresh => TaskPolicy::LatestOnly,
            TaskKind::ChatCreate
            | TaskKind::ChatRename
            | TaskKind::ChatDelete
            | TaskKind::SignOut => TaskPolicy::Every,
        }
    }
}

/// Completion gating for a task kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPolicy {
    /// A newer start supersedes older ones; stale completions are dropped.
    LatestOnly,
    /// Every started task delivers its completion.
    Every,
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state (stored in AppState, mutated only by reducer).
#[derive(Debug, Clone)]
pub struct TaskState {
    policy: TaskPolicy,
    active: Vec<TaskId>,
}

impl TaskState {
    pub fn new(policy: TaskPolicy) -> Self {
        Self {
            policy,
            active: Vec::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        !self.active.is_empty()
    }

    pub fn in_flight(&self) -> usize {
        self.active.len()
    }

    pub fn on_started(&mut self, started: &TaskStarted) {
        match self.policy {
            TaskPolicy::LatestOnly => {
                self.active.clear();
                self.active.push(started.id);
            }
            TaskPolicy::Every => self.active.push(started.id),
        }
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let Some(index) = self.active.iter().position(|active| *active == id) else {
            return false;
        };
        self.active.remove(index);
        true
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

#[derive(Debug, Clone)]
pub struct Tasks {
    pub chat_list: TaskState,
    pub chat_create: TaskState,
    pub chat_rename: TaskState,
    pub chat_delete: TaskState,
    pub messages: TaskState,
    pub sign_in: TaskState,
    pub sign_up: TaskState,
    pub sign_out: TaskState,
    pub session_refresh: TaskState,
}

impl Default for Tasks {
    fn default() -> Self {
        let state = |kind: TaskKind| TaskState::new(kind.policy());
        Self {
            chat_list: state(TaskKind::ChatList),
            chat_create: state(TaskKind::ChatCreate),
            chat_rename: state(TaskKind::ChatRename),
            chat_delete: state(TaskKind::ChatDelete),
            messages: state(TaskKind::Messages),
            sign_in: state(TaskKind::SignIn),
            sign_up: state(TaskKind::SignUp),
            sign_out: state(TaskKind::SignOut),
            session_refresh: state(TaskKind::SessionRefresh),
        }
    }
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::ChatList => &self.chat_list,
            TaskKind::ChatCreate => &self.chat_create,
            TaskKind::ChatRename => &self.chat_rename,
            TaskKind::ChatDelete => &self.chat_delete,
            TaskKind::Messages => &self.messages,
            TaskKind::SignIn => &self.sign_in,
            TaskKind::SignUp => &self.sign_up,
            TaskKind::SignOut => &self.sign_out,
            TaskKind::SessionRefresh => &self.session_refresh,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::ChatList => &mut self.chat_list,
            TaskKind::ChatCreate => &mut self.chat_create,
            TaskKind::ChatRename => &mut self.chat_rename,
            TaskKind::ChatDelete => &mut self.chat_delete,
            TaskKind::Messages => &mut self.messages,
            TaskKind::SignIn => &mut self.sign_in,
            TaskKind::SignUp => &mut self.sign_up,
            TaskKind::SignOut => &mut self.sign_out,
            TaskKind::SessionRefresh => &mut self.session_refresh,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.chat_list.is_running()
            || self.chat_create.is_running()
            || self.chat_rename.is_running()
            || self.chat_delete.is_running()
            || self.messages.is_running()
            || self.sign_in.is_running()
            || self.sign_up.is_running()
            || self.sign_out.is_running()
            || self.session_refresh.is_running()
    }

    /// Forgets every in-flight task (used on sign-out so late completions
    /// from the previous session are dropped).
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }
}
