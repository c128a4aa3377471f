use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use chrono_tz::Tz;
use crossterm::event::{self, Event, KeyEvent};
use uuid::Uuid;

use crate::{
    client::{Client, ClientError},
    colors,
    config::AppConfig,
    error::{AppError, Result},
    forms,
    ui,
};

use api_types::{
    expense::{ExpenseNew, ExpenseUpdate, ExpenseView},
    group::GroupOverview,
    payment_method::PaymentMethodView,
    tag::TagView,
    user::UserView,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Groups,
    Users,
    PaymentMethods,
    Tags,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Self::Groups => "Grupos",
            Self::Users => "Usuários",
            Self::PaymentMethods => "Pagamentos",
            Self::Tags => "Tags",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupsMode {
    List,
    Create,
    Rename,
    Detail,
    NewExpense,
    EditExpense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsersMode {
    List,
    Create,
    Rename,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodsMode {
    List,
    Create,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagsMode {
    List,
    Create,
    Edit,
}

#[derive(Debug, Default)]
pub struct NameForm {
    pub name: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFormField {
    Name,
    Color,
}

/// Name plus a picker index into [`colors::PRESET_COLORS`].
#[derive(Debug)]
pub struct ColorForm {
    pub name: String,
    pub color_index: usize,
    pub focus: ColorFormField,
    pub error: Option<String>,
}

impl Default for ColorForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            color_index: 0,
            focus: ColorFormField::Name,
            error: None,
        }
    }
}

impl ColorForm {
    pub fn color(&self) -> &'static str {
        colors::PRESET_COLORS
            .get(self.color_index)
            .copied()
            .unwrap_or(colors::DEFAULT_COLOR)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseFormField {
    Name,
    Amount,
    Payer,
    Method,
    Tags,
}

#[derive(Debug)]
pub struct ExpenseForm {
    pub name: String,
    pub amount: String,
    pub payer_index: Option<usize>,
    pub method_index: Option<usize>,
    pub tag_cursor: usize,
    pub selected_tags: Vec<Uuid>,
    pub focus: ExpenseFormField,
    pub error: Option<String>,
}

impl Default for ExpenseForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            amount: String::new(),
            payer_index: None,
            method_index: None,
            tag_cursor: 0,
            selected_tags: Vec::new(),
            focus: ExpenseFormField::Name,
            error: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct GroupDetailState {
    pub group_id: Option<Uuid>,
    pub expenses: Vec<ExpenseView>,
    pub selected: usize,
    pub form: ExpenseForm,
    pub editing: Option<Uuid>,
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct GroupsState {
    pub mode: GroupsMode,
    pub items: Vec<GroupOverview>,
    pub selected: usize,
    pub form: NameForm,
    pub detail: GroupDetailState,
    pub error: Option<String>,
}

impl Default for GroupsState {
    fn default() -> Self {
        Self {
            mode: GroupsMode::List,
            items: Vec::new(),
            selected: 0,
            form: NameForm::default(),
            detail: GroupDetailState::default(),
            error: None,
        }
    }
}

#[derive(Debug)]
pub struct UsersState {
    pub mode: UsersMode,
    pub items: Vec<UserView>,
    pub selected: usize,
    pub form: NameForm,
    pub error: Option<String>,
}

impl Default for UsersState {
    fn default() -> Self {
        Self {
            mode: UsersMode::List,
            items: Vec::new(),
            selected: 0,
            form: NameForm::default(),
            error: None,
        }
    }
}

#[derive(Debug)]
pub struct MethodsState {
    pub mode: MethodsMode,
    pub items: Vec<PaymentMethodView>,
    pub selected: usize,
    pub form: ColorForm,
    pub error: Option<String>,
}

impl Default for MethodsState {
    fn default() -> Self {
        Self {
            mode: MethodsMode::List,
            items: Vec::new(),
            selected: 0,
            form: ColorForm::default(),
            error: None,
        }
    }
}

#[derive(Debug)]
pub struct TagsState {
    pub mode: TagsMode,
    pub items: Vec<TagView>,
    pub selected: usize,
    pub form: ColorForm,
    pub error: Option<String>,
}

impl Default for TagsState {
    fn default() -> Self {
        Self {
            mode: TagsMode::List,
            items: Vec::new(),
            selected: 0,
            form: ColorForm::default(),
            error: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    pub expires_at: Instant,
}

#[derive(Debug, Default)]
pub struct ConnectionState {
    pub ok: bool,
}

#[derive(Debug)]
pub struct AppState {
    pub section: Section,
    pub groups: GroupsState,
    pub users: UsersState,
    pub methods: MethodsState,
    pub tags: TagsState,
    pub toast: Option<ToastState>,
    pub connection: ConnectionState,
    pub last_refresh: Option<DateTime<Local>>,
    pub timezone: Tz,
    pub base_url: String,
}

pub struct App {
    config: AppConfig,
    client: Client,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let timezone = config
            .timezone
            .parse::<Tz>()
            .unwrap_or(chrono_tz::America::Sao_Paulo);
        let state = AppState {
            section: Section::Groups,
            groups: GroupsState::default(),
            users: UsersState::default(),
            methods: MethodsState::default(),
            tags: TagsState::default(),
            toast: None,
            connection: ConnectionState::default(),
            last_refresh: None,
            timezone,
            base_url: config.base_url.clone(),
        };

        Ok(Self {
            config,
            client,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        self.reload_section().await;

        while !self.should_quit {
            self.expire_toast();
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key).await?,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match crate::ui::keymap::map_key(key) {
            crate::ui::keymap::AppAction::Quit => {
                self.should_quit = true;
            }
            crate::ui::keymap::AppAction::Cancel => {
                self.cancel();
            }
            crate::ui::keymap::AppAction::NextField => {
                self.advance_focus();
            }
            crate::ui::keymap::AppAction::Submit => {
                self.submit().await;
            }
            crate::ui::keymap::AppAction::Backspace => {
                self.backspace();
            }
            crate::ui::keymap::AppAction::Up => {
                self.move_up();
            }
            crate::ui::keymap::AppAction::Down => {
                self.move_down();
            }
            crate::ui::keymap::AppAction::Input(ch) => {
                self.input(ch).await;
            }
            crate::ui::keymap::AppAction::None => {}
        }

        Ok(())
    }

    #[allow(dead_code)]
    pub fn client(&self) -> &Client {
        &self.client
    }

    #[allow(dead_code)]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn expire_toast(&mut self) {
        if let Some(toast) = self.state.toast.as_ref() {
            if toast.expires_at <= Instant::now() {
                self.state.toast = None;
            }
        }
    }

    fn show_toast(&mut self, message: impl Into<String>, level: ToastLevel) {
        self.state.toast = Some(ToastState {
            message: message.into(),
            level,
            expires_at: Instant::now() + Duration::from_secs(3),
        });
    }

    fn form_active(&self) -> bool {
        match self.state.section {
            Section::Groups => matches!(
                self.state.groups.mode,
                GroupsMode::Create
                    | GroupsMode::Rename
                    | GroupsMode::NewExpense
                    | GroupsMode::EditExpense
            ),
            Section::Users => matches!(self.state.users.mode, UsersMode::Create | UsersMode::Rename),
            Section::PaymentMethods => matches!(
                self.state.methods.mode,
                MethodsMode::Create | MethodsMode::Edit
            ),
            Section::Tags => matches!(self.state.tags.mode, TagsMode::Create | TagsMode::Edit),
        }
    }

    async fn input(&mut self, ch: char) {
        if self.form_active() {
            self.type_char(ch);
            return;
        }

        self.handle_command_key(ch).await;
    }

    fn type_char(&mut self, ch: char) {
        match self.state.section {
            Section::Groups => match self.state.groups.mode {
                GroupsMode::Create | GroupsMode::Rename => self.state.groups.form.name.push(ch),
                GroupsMode::NewExpense | GroupsMode::EditExpense => {
                    let tags_len = self.state.tags.items.len();
                    let form = &mut self.state.groups.detail.form;
                    match form.focus {
                        ExpenseFormField::Name => form.name.push(ch),
                        ExpenseFormField::Amount => form.amount.push(ch),
                        ExpenseFormField::Tags => {
                            if ch == ' ' {
                                toggle_tag(form, &self.state.tags.items, tags_len);
                            }
                        }
                        ExpenseFormField::Payer | ExpenseFormField::Method => {}
                    }
                }
                _ => {}
            },
            Section::Users => {
                if matches!(self.state.users.mode, UsersMode::Create | UsersMode::Rename) {
                    self.state.users.form.name.push(ch);
                }
            }
            Section::PaymentMethods => {
                if self.state.methods.form.focus == ColorFormField::Name {
                    self.state.methods.form.name.push(ch);
                }
            }
            Section::Tags => {
                if self.state.tags.form.focus == ColorFormField::Name {
                    self.state.tags.form.name.push(ch);
                }
            }
        }
    }

    async fn handle_command_key(&mut self, ch: char) {
        match ch {
            'q' | 'Q' => self.should_quit = true,
            'g' | 'G' => self.switch_section(Section::Groups).await,
            'u' | 'U' => self.switch_section(Section::Users).await,
            'p' | 'P' => self.switch_section(Section::PaymentMethods).await,
            't' | 'T' => self.switch_section(Section::Tags).await,
            'r' | 'R' => self.reload_section().await,
            'c' | 'C' => self.open_create().await,
            'e' | 'E' => self.open_edit().await,
            'd' | 'D' => self.delete_selected().await,
            'b' | 'B' => {
                if self.state.section == Section::Groups
                    && self.state.groups.mode == GroupsMode::Detail
                {
                    self.state.groups.mode = GroupsMode::List;
                }
            }
            'j' | 'J' => self.move_down(),
            'k' | 'K' => self.move_up(),
            _ => {}
        }
    }

    async fn switch_section(&mut self, section: Section) {
        self.state.section = section;
        match section {
            Section::Groups => self.state.groups.mode = GroupsMode::List,
            Section::Users => self.state.users.mode = UsersMode::List,
            Section::PaymentMethods => self.state.methods.mode = MethodsMode::List,
            Section::Tags => self.state.tags.mode = TagsMode::List,
        }
        self.reload_section().await;
    }

    /// The active section refetches whenever it gains focus, so stale data
    /// never survives navigation.
    async fn reload_section(&mut self) {
        match self.state.section {
            Section::Groups => {
                self.reload_groups().await;
                if self.state.groups.mode == GroupsMode::Detail {
                    self.reload_detail().await;
                }
            }
            Section::Users => self.reload_users().await,
            Section::PaymentMethods => self.reload_methods().await,
            Section::Tags => self.reload_tags().await,
        }
    }

    async fn reload_groups(&mut self) {
        match self.client.groups().await {
            Ok(items) => {
                let len = items.len();
                self.state.groups.items = items;
                self.state.groups.selected = self.state.groups.selected.min(len.saturating_sub(1));
                self.state.groups.error = None;
                self.mark_refreshed();
            }
            Err(err) => {
                self.state.groups.error = Some(message_for_error(err));
                self.state.connection.ok = false;
            }
        }
    }

    async fn reload_users(&mut self) {
        match self.client.users().await {
            Ok(items) => {
                let len = items.len();
                self.state.users.items = items;
                self.state.users.selected = self.state.users.selected.min(len.saturating_sub(1));
                self.state.users.error = None;
                self.mark_refreshed();
            }
            Err(err) => {
                self.state.users.error = Some(message_for_error(err));
                self.state.connection.ok = false;
            }
        }
    }

    async fn reload_methods(&mut self) {
        match self.client.payment_methods().await {
            Ok(items) => {
                let len = items.len();
                self.state.methods.items = items;
                self.state.methods.selected =
                    self.state.methods.selected.min(len.saturating_sub(1));
                self.state.methods.error = None;
                self.mark_refreshed();
            }
            Err(err) => {
                self.state.methods.error = Some(message_for_error(err));
                self.state.connection.ok = false;
            }
        }
    }

    async fn reload_tags(&mut self) {
        match self.client.tags().await {
            Ok(items) => {
                let len = items.len();
                self.state.tags.items = items;
                self.state.tags.selected = self.state.tags.selected.min(len.saturating_sub(1));
                self.state.tags.error = None;
                self.mark_refreshed();
            }
            Err(err) => {
                self.state.tags.error = Some(message_for_error(err));
                self.state.connection.ok = false;
            }
        }
    }

    async fn reload_detail(&mut self) {
        let Some(group_id) = self.state.groups.detail.group_id else {
            return;
        };

        match self.client.group_expenses(group_id).await {
            Ok(expenses) => {
                let len = expenses.len();
                self.state.groups.detail.expenses = expenses;
                self.state.groups.detail.selected =
                    self.state.groups.detail.selected.min(len.saturating_sub(1));
                self.state.groups.detail.error = None;
                self.mark_refreshed();
            }
            Err(err) => {
                self.state.groups.detail.error = Some(message_for_error(err));
                self.state.connection.ok = false;
            }
        }
    }

    /// The expense form needs fresh users, payment methods and tags before it
    /// opens. Returns false when any of them could not be fetched.
    async fn load_reference_data(&mut self) -> bool {
        let users = self.client.users().await;
        let methods = self.client.payment_methods().await;
        let tags = self.client.tags().await;

        match (users, methods, tags) {
            (Ok(users), Ok(methods), Ok(tags)) => {
                self.state.users.items = users;
                self.state.users.selected = self
                    .state
                    .users
                    .selected
                    .min(self.state.users.items.len().saturating_sub(1));
                self.state.methods.items = methods;
                self.state.methods.selected = self
                    .state
                    .methods
                    .selected
                    .min(self.state.methods.items.len().saturating_sub(1));
                self.state.tags.items = tags;
                self.state.tags.selected = self
                    .state
                    .tags
                    .selected
                    .min(self.state.tags.items.len().saturating_sub(1));
                self.mark_refreshed();
                true
            }
            _ => {
                self.show_toast(
                    "Não foi possível carregar os dados necessários",
                    ToastLevel::Error,
                );
                self.state.connection.ok = false;
                false
            }
        }
    }

    fn mark_refreshed(&mut self) {
        self.state.connection.ok = true;
        self.state.last_refresh = Some(Local::now());
    }

    async fn open_create(&mut self) {
        match self.state.section {
            Section::Groups => match self.state.groups.mode {
                GroupsMode::List => {
                    self.state.groups.form = NameForm::default();
                    self.state.groups.mode = GroupsMode::Create;
                }
                GroupsMode::Detail => self.open_expense_form(None).await,
                _ => {}
            },
            Section::Users => {
                if self.state.users.mode == UsersMode::List {
                    self.state.users.form = NameForm::default();
                    self.state.users.mode = UsersMode::Create;
                }
            }
            Section::PaymentMethods => {
                if self.state.methods.mode == MethodsMode::List {
                    self.state.methods.form = ColorForm::default();
                    self.state.methods.mode = MethodsMode::Create;
                }
            }
            Section::Tags => {
                if self.state.tags.mode == TagsMode::List {
                    self.state.tags.form = ColorForm::default();
                    self.state.tags.mode = TagsMode::Create;
                }
            }
        }
    }

    async fn open_edit(&mut self) {
        match self.state.section {
            Section::Groups => match self.state.groups.mode {
                GroupsMode::List => {
                    let Some(name) = self
                        .state
                        .groups
                        .items
                        .get(self.state.groups.selected)
                        .map(|group| group.name.clone())
                    else {
                        return;
                    };
                    self.state.groups.form = NameForm {
                        name,
                        error: None,
                    };
                    self.state.groups.mode = GroupsMode::Rename;
                }
                GroupsMode::Detail => {
                    let selected = self
                        .state
                        .groups
                        .detail
                        .expenses
                        .get(self.state.groups.detail.selected)
                        .map(|expense| expense.id);
                    if let Some(expense_id) = selected {
                        self.open_expense_form(Some(expense_id)).await;
                    }
                }
                _ => {}
            },
            Section::Users => {
                if self.state.users.mode != UsersMode::List {
                    return;
                }
                let Some(name) = self
                    .state
                    .users
                    .items
                    .get(self.state.users.selected)
                    .map(|user| user.name.clone())
                else {
                    return;
                };
                self.state.users.form = NameForm {
                    name,
                    error: None,
                };
                self.state.users.mode = UsersMode::Rename;
            }
            Section::PaymentMethods => {
                if self.state.methods.mode != MethodsMode::List {
                    return;
                }
                let Some((name, color)) = self
                    .state
                    .methods
                    .items
                    .get(self.state.methods.selected)
                    .map(|method| (method.name.clone(), method.color.clone()))
                else {
                    return;
                };
                self.state.methods.form = ColorForm {
                    name,
                    color_index: preset_index(&color),
                    focus: ColorFormField::Name,
                    error: None,
                };
                self.state.methods.mode = MethodsMode::Edit;
            }
            Section::Tags => {
                if self.state.tags.mode != TagsMode::List {
                    return;
                }
                let Some((name, color)) = self
                    .state
                    .tags
                    .items
                    .get(self.state.tags.selected)
                    .map(|tag| (tag.name.clone(), tag.color.clone()))
                else {
                    return;
                };
                self.state.tags.form = ColorForm {
                    name,
                    color_index: preset_index(&color),
                    focus: ColorFormField::Name,
                    error: None,
                };
                self.state.tags.mode = TagsMode::Edit;
            }
        }
    }

    async fn open_expense_form(&mut self, expense_id: Option<Uuid>) {
        if !self.load_reference_data().await {
            return;
        }
        if self.state.users.items.is_empty() {
            self.show_toast(
                "É necessário cadastrar pelo menos um usuário.",
                ToastLevel::Info,
            );
            return;
        }
        if self.state.methods.items.is_empty() {
            self.show_toast(
                "É necessário cadastrar pelo menos uma forma de pagamento.",
                ToastLevel::Info,
            );
            return;
        }

        let mut form = ExpenseForm::default();
        if let Some(expense_id) = expense_id {
            let Some(expense) = self
                .state
                .groups
                .detail
                .expenses
                .iter()
                .find(|expense| expense.id == expense_id)
                .cloned()
            else {
                return;
            };
            form.name = expense.name;
            form.amount = amount_input(expense.amount_cents);
            form.payer_index = self
                .state
                .users
                .items
                .iter()
                .position(|user| user.id == expense.user_id);
            form.method_index = self
                .state
                .methods
                .items
                .iter()
                .position(|method| method.id == expense.payment_method_id);
            form.selected_tags = expense.tags.iter().map(|tag| tag.id).collect();
            self.state.groups.detail.editing = Some(expense_id);
            self.state.groups.mode = GroupsMode::EditExpense;
        } else {
            self.state.groups.detail.editing = None;
            self.state.groups.mode = GroupsMode::NewExpense;
        }
        self.state.groups.detail.form = form;
    }

    async fn delete_selected(&mut self) {
        match self.state.section {
            Section::Groups => match self.state.groups.mode {
                GroupsMode::List => {
                    let Some(group_id) = self
                        .state
                        .groups
                        .items
                        .get(self.state.groups.selected)
                        .map(|group| group.id)
                    else {
                        return;
                    };
                    match self.client.delete_group(group_id).await {
                        Ok(()) => {
                            self.show_toast("Grupo excluído", ToastLevel::Success);
                            self.reload_groups().await;
                        }
                        Err(err) => {
                            self.show_toast(message_for_error(err), ToastLevel::Error);
                        }
                    }
                }
                GroupsMode::Detail => {
                    let Some(expense_id) = self
                        .state
                        .groups
                        .detail
                        .expenses
                        .get(self.state.groups.detail.selected)
                        .map(|expense| expense.id)
                    else {
                        return;
                    };
                    match self.client.delete_expense(expense_id).await {
                        Ok(()) => {
                            self.show_toast("Despesa excluída", ToastLevel::Success);
                            self.reload_detail().await;
                            self.reload_groups().await;
                        }
                        Err(err) => {
                            self.show_toast(message_for_error(err), ToastLevel::Error);
                        }
                    }
                }
                _ => {}
            },
            Section::Users => {
                if self.state.users.mode != UsersMode::List {
                    return;
                }
                let Some(user_id) = self
                    .state
                    .users
                    .items
                    .get(self.state.users.selected)
                    .map(|user| user.id)
                else {
                    return;
                };
                match self.client.delete_user(user_id).await {
                    Ok(()) => {
                        self.show_toast("Usuário excluído", ToastLevel::Success);
                        self.reload_users().await;
                    }
                    Err(err) => {
                        self.show_toast(message_for_error(err), ToastLevel::Error);
                    }
                }
            }
            Section::PaymentMethods => {
                if self.state.methods.mode != MethodsMode::List {
                    return;
                }
                let Some(method_id) = self
                    .state
                    .methods
                    .items
                    .get(self.state.methods.selected)
                    .map(|method| method.id)
                else {
                    return;
                };
                match self.client.delete_payment_method(method_id).await {
                    Ok(()) => {
                        self.show_toast("Forma de pagamento excluída", ToastLevel::Success);
                        self.reload_methods().await;
                    }
                    Err(err) => {
                        self.show_toast(message_for_error(err), ToastLevel::Error);
                    }
                }
            }
            Section::Tags => {
                if self.state.tags.mode != TagsMode::List {
                    return;
                }
                let Some(tag_id) = self
                    .state
                    .tags
                    .items
                    .get(self.state.tags.selected)
                    .map(|tag| tag.id)
                else {
                    return;
                };
                match self.client.delete_tag(tag_id).await {
                    Ok(()) => {
                        self.show_toast("Tag excluída", ToastLevel::Success);
                        self.reload_tags().await;
                    }
                    Err(err) => {
                        self.show_toast(message_for_error(err), ToastLevel::Error);
                    }
                }
            }
        }
    }

    async fn submit(&mut self) {
        match self.state.section {
            Section::Groups => match self.state.groups.mode {
                GroupsMode::List => self.open_detail().await,
                GroupsMode::Create => self.submit_group(false).await,
                GroupsMode::Rename => self.submit_group(true).await,
                GroupsMode::Detail => {
                    let selected = self
                        .state
                        .groups
                        .detail
                        .expenses
                        .get(self.state.groups.detail.selected)
                        .map(|expense| expense.id);
                    if let Some(expense_id) = selected {
                        self.open_expense_form(Some(expense_id)).await;
                    }
                }
                GroupsMode::NewExpense | GroupsMode::EditExpense => self.submit_expense().await,
            },
            Section::Users => match self.state.users.mode {
                UsersMode::List => {}
                UsersMode::Create => self.submit_user(false).await,
                UsersMode::Rename => self.submit_user(true).await,
            },
            Section::PaymentMethods => match self.state.methods.mode {
                MethodsMode::List => {}
                MethodsMode::Create => self.submit_method(false).await,
                MethodsMode::Edit => self.submit_method(true).await,
            },
            Section::Tags => match self.state.tags.mode {
                TagsMode::List => {}
                TagsMode::Create => self.submit_tag(false).await,
                TagsMode::Edit => self.submit_tag(true).await,
            },
        }
    }

    async fn open_detail(&mut self) {
        let Some(group_id) = self
            .state
            .groups
            .items
            .get(self.state.groups.selected)
            .map(|group| group.id)
        else {
            return;
        };

        self.state.groups.detail = GroupDetailState {
            group_id: Some(group_id),
            ..GroupDetailState::default()
        };
        self.state.groups.mode = GroupsMode::Detail;
        self.reload_detail().await;
    }

    async fn submit_group(&mut self, rename: bool) {
        let name = match forms::validate_name(&self.state.groups.form.name) {
            Ok(name) => name,
            Err(message) => {
                self.state.groups.form.error = Some(message);
                return;
            }
        };

        let result = if rename {
            let Some(group_id) = self
                .state
                .groups
                .items
                .get(self.state.groups.selected)
                .map(|group| group.id)
            else {
                return;
            };
            self.client.update_group(group_id, &name).await.map(|_| ())
        } else {
            self.client.new_group(&name).await.map(|_| ())
        };

        match result {
            Ok(()) => {
                self.state.groups.mode = GroupsMode::List;
                self.show_toast(
                    if rename {
                        "Grupo atualizado com sucesso"
                    } else {
                        "Grupo criado com sucesso"
                    },
                    ToastLevel::Success,
                );
                self.reload_groups().await;
            }
            Err(err) => {
                self.state.groups.form.error = Some(message_for_error(err));
            }
        }
    }

    async fn submit_user(&mut self, rename: bool) {
        let name = match forms::validate_name(&self.state.users.form.name) {
            Ok(name) => name,
            Err(message) => {
                self.state.users.form.error = Some(message);
                return;
            }
        };

        let result = if rename {
            let Some(user_id) = self
                .state
                .users
                .items
                .get(self.state.users.selected)
                .map(|user| user.id)
            else {
                return;
            };
            self.client.update_user(user_id, &name).await.map(|_| ())
        } else {
            self.client.new_user(&name).await.map(|_| ())
        };

        match result {
            Ok(()) => {
                self.state.users.mode = UsersMode::List;
                self.show_toast(
                    if rename {
                        "Usuário atualizado com sucesso"
                    } else {
                        "Usuário criado com sucesso"
                    },
                    ToastLevel::Success,
                );
                self.reload_users().await;
            }
            Err(err) => {
                self.state.users.form.error = Some(message_for_error(err));
            }
        }
    }

    async fn submit_method(&mut self, edit: bool) {
        let name = match forms::validate_name(&self.state.methods.form.name) {
            Ok(name) => name,
            Err(message) => {
                self.state.methods.form.error = Some(message);
                return;
            }
        };
        let color = self.state.methods.form.color();

        let result = if edit {
            let Some(method_id) = self
                .state
                .methods
                .items
                .get(self.state.methods.selected)
                .map(|method| method.id)
            else {
                return;
            };
            self.client
                .update_payment_method(method_id, &name, color)
                .await
                .map(|_| ())
        } else {
            self.client
                .new_payment_method(&name, color)
                .await
                .map(|_| ())
        };

        match result {
            Ok(()) => {
                self.state.methods.mode = MethodsMode::List;
                self.show_toast(
                    if edit {
                        "Forma de pagamento atualizada com sucesso"
                    } else {
                        "Forma de pagamento criada com sucesso"
                    },
                    ToastLevel::Success,
                );
                self.reload_methods().await;
            }
            Err(err) => {
                self.state.methods.form.error = Some(message_for_error(err));
            }
        }
    }

    async fn submit_tag(&mut self, edit: bool) {
        let name = match forms::validate_name(&self.state.tags.form.name) {
            Ok(name) => name,
            Err(message) => {
                self.state.tags.form.error = Some(message);
                return;
            }
        };
        let color = self.state.tags.form.color();

        let result = if edit {
            let Some(tag_id) = self
                .state
                .tags
                .items
                .get(self.state.tags.selected)
                .map(|tag| tag.id)
            else {
                return;
            };
            self.client.update_tag(tag_id, &name, color).await.map(|_| ())
        } else {
            self.client.new_tag(&name, color).await.map(|_| ())
        };

        match result {
            Ok(()) => {
                self.state.tags.mode = TagsMode::List;
                self.show_toast(
                    if edit {
                        "Tag atualizada com sucesso"
                    } else {
                        "Tag criada com sucesso"
                    },
                    ToastLevel::Success,
                );
                self.reload_tags().await;
            }
            Err(err) => {
                self.state.tags.form.error = Some(message_for_error(err));
            }
        }
    }

    async fn submit_expense(&mut self) {
        let form = &self.state.groups.detail.form;
        let user_id = form
            .payer_index
            .and_then(|index| self.state.users.items.get(index))
            .map(|user| user.id);
        let method_id = form
            .method_index
            .and_then(|index| self.state.methods.items.get(index))
            .map(|method| method.id);

        let draft = match forms::validate_expense(
            &form.name,
            &form.amount,
            user_id,
            method_id,
            &form.selected_tags,
        ) {
            Ok(draft) => draft,
            Err(message) => {
                self.state.groups.detail.form.error = Some(message);
                return;
            }
        };

        let editing = self.state.groups.detail.editing;
        let result = if let Some(expense_id) = editing {
            let payload = ExpenseUpdate {
                user_id: draft.user_id,
                payment_method_id: draft.payment_method_id,
                name: draft.name,
                amount_cents: draft.amount_cents,
                tag_ids: draft.tag_ids,
            };
            self.client
                .update_expense(expense_id, &payload)
                .await
                .map(|_| ())
        } else {
            let Some(group_id) = self.state.groups.detail.group_id else {
                return;
            };
            let payload = ExpenseNew {
                group_id,
                user_id: draft.user_id,
                payment_method_id: draft.payment_method_id,
                name: draft.name,
                amount_cents: draft.amount_cents,
                tag_ids: draft.tag_ids,
            };
            self.client.new_expense(&payload).await.map(|_| ())
        };

        match result {
            Ok(()) => {
                let updated = editing.is_some();
                self.state.groups.mode = GroupsMode::Detail;
                self.state.groups.detail.editing = None;
                self.show_toast(
                    if updated {
                        "Despesa atualizada com sucesso"
                    } else {
                        "Despesa criada com sucesso"
                    },
                    ToastLevel::Success,
                );
                self.reload_detail().await;
                self.reload_groups().await;
            }
            Err(err) => {
                self.state.groups.detail.form.error = Some(message_for_error(err));
                self.show_toast(
                    if editing.is_some() {
                        "Não foi possível atualizar a despesa"
                    } else {
                        "Não foi possível criar a despesa"
                    },
                    ToastLevel::Error,
                );
            }
        }
    }

    fn cancel(&mut self) {
        match self.state.section {
            Section::Groups => match self.state.groups.mode {
                GroupsMode::Create | GroupsMode::Rename => {
                    self.state.groups.mode = GroupsMode::List;
                }
                GroupsMode::NewExpense | GroupsMode::EditExpense => {
                    self.state.groups.detail.editing = None;
                    self.state.groups.mode = GroupsMode::Detail;
                }
                GroupsMode::Detail => self.state.groups.mode = GroupsMode::List,
                GroupsMode::List => {}
            },
            Section::Users => self.state.users.mode = UsersMode::List,
            Section::PaymentMethods => self.state.methods.mode = MethodsMode::List,
            Section::Tags => self.state.tags.mode = TagsMode::List,
        }
    }

    fn advance_focus(&mut self) {
        match self.state.section {
            Section::Groups => {
                if matches!(
                    self.state.groups.mode,
                    GroupsMode::NewExpense | GroupsMode::EditExpense
                ) {
                    let form = &mut self.state.groups.detail.form;
                    form.focus = match form.focus {
                        ExpenseFormField::Name => ExpenseFormField::Amount,
                        ExpenseFormField::Amount => ExpenseFormField::Payer,
                        ExpenseFormField::Payer => ExpenseFormField::Method,
                        ExpenseFormField::Method => ExpenseFormField::Tags,
                        ExpenseFormField::Tags => ExpenseFormField::Name,
                    };
                }
            }
            Section::PaymentMethods => {
                if self.state.methods.mode != MethodsMode::List {
                    let form = &mut self.state.methods.form;
                    form.focus = match form.focus {
                        ColorFormField::Name => ColorFormField::Color,
                        ColorFormField::Color => ColorFormField::Name,
                    };
                }
            }
            Section::Tags => {
                if self.state.tags.mode != TagsMode::List {
                    let form = &mut self.state.tags.form;
                    form.focus = match form.focus {
                        ColorFormField::Name => ColorFormField::Color,
                        ColorFormField::Color => ColorFormField::Name,
                    };
                }
            }
            Section::Users => {}
        }
    }

    fn backspace(&mut self) {
        match self.state.section {
            Section::Groups => match self.state.groups.mode {
                GroupsMode::Create | GroupsMode::Rename => {
                    self.state.groups.form.name.pop();
                }
                GroupsMode::NewExpense | GroupsMode::EditExpense => {
                    let form = &mut self.state.groups.detail.form;
                    match form.focus {
                        ExpenseFormField::Name => {
                            form.name.pop();
                        }
                        ExpenseFormField::Amount => {
                            form.amount.pop();
                        }
                        _ => {}
                    }
                }
                _ => {}
            },
            Section::Users => {
                self.state.users.form.name.pop();
            }
            Section::PaymentMethods => {
                if self.state.methods.form.focus == ColorFormField::Name {
                    self.state.methods.form.name.pop();
                }
            }
            Section::Tags => {
                if self.state.tags.form.focus == ColorFormField::Name {
                    self.state.tags.form.name.pop();
                }
            }
        }
    }

    fn move_up(&mut self) {
        match self.state.section {
            Section::Groups => match self.state.groups.mode {
                GroupsMode::List => select_prev(&mut self.state.groups.selected),
                GroupsMode::Detail => select_prev(&mut self.state.groups.detail.selected),
                GroupsMode::NewExpense | GroupsMode::EditExpense => self.cycle_expense_field(false),
                _ => {}
            },
            Section::Users => {
                if self.state.users.mode == UsersMode::List {
                    select_prev(&mut self.state.users.selected);
                }
            }
            Section::PaymentMethods => match self.state.methods.mode {
                MethodsMode::List => select_prev(&mut self.state.methods.selected),
                _ => cycle_color(&mut self.state.methods.form, false),
            },
            Section::Tags => match self.state.tags.mode {
                TagsMode::List => select_prev(&mut self.state.tags.selected),
                _ => cycle_color(&mut self.state.tags.form, false),
            },
        }
    }

    fn move_down(&mut self) {
        match self.state.section {
            Section::Groups => match self.state.groups.mode {
                GroupsMode::List => {
                    select_next(&mut self.state.groups.selected, self.state.groups.items.len());
                }
                GroupsMode::Detail => {
                    select_next(
                        &mut self.state.groups.detail.selected,
                        self.state.groups.detail.expenses.len(),
                    );
                }
                GroupsMode::NewExpense | GroupsMode::EditExpense => self.cycle_expense_field(true),
                _ => {}
            },
            Section::Users => {
                if self.state.users.mode == UsersMode::List {
                    select_next(&mut self.state.users.selected, self.state.users.items.len());
                }
            }
            Section::PaymentMethods => match self.state.methods.mode {
                MethodsMode::List => {
                    select_next(
                        &mut self.state.methods.selected,
                        self.state.methods.items.len(),
                    );
                }
                _ => cycle_color(&mut self.state.methods.form, true),
            },
            Section::Tags => match self.state.tags.mode {
                TagsMode::List => {
                    select_next(&mut self.state.tags.selected, self.state.tags.items.len());
                }
                _ => cycle_color(&mut self.state.tags.form, true),
            },
        }
    }

    fn cycle_expense_field(&mut self, forward: bool) {
        let users_len = self.state.users.items.len();
        let methods_len = self.state.methods.items.len();
        let tags_len = self.state.tags.items.len();
        let form = &mut self.state.groups.detail.form;

        match form.focus {
            ExpenseFormField::Payer => {
                form.payer_index = cycle_option(form.payer_index, users_len, forward);
            }
            ExpenseFormField::Method => {
                form.method_index = cycle_option(form.method_index, methods_len, forward);
            }
            ExpenseFormField::Tags => {
                if tags_len == 0 {
                    return;
                }
                if forward {
                    form.tag_cursor = (form.tag_cursor + 1).min(tags_len - 1);
                } else {
                    form.tag_cursor = form.tag_cursor.saturating_sub(1);
                }
            }
            ExpenseFormField::Name | ExpenseFormField::Amount => {}
        }
    }
}

fn select_next(selected: &mut usize, len: usize) {
    if len == 0 {
        return;
    }
    *selected = (*selected + 1).min(len - 1);
}

fn select_prev(selected: &mut usize) {
    *selected = selected.saturating_sub(1);
}

fn cycle_option(index: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let next = match (index, forward) {
        (None, _) => 0,
        (Some(current), true) => (current + 1) % len,
        (Some(current), false) => (current + len - 1) % len,
    };
    Some(next)
}

/// Picker position of a stored color, or the first preset when the color
/// is not one of ours.
fn preset_index(color: &str) -> usize {
    colors::PRESET_COLORS
        .iter()
        .position(|preset| preset.eq_ignore_ascii_case(color))
        .unwrap_or(0)
}

fn cycle_color(form: &mut ColorForm, forward: bool) {
    if form.focus != ColorFormField::Color {
        return;
    }
    let len = colors::PRESET_COLORS.len();
    form.color_index = if forward {
        (form.color_index + 1) % len
    } else {
        (form.color_index + len - 1) % len
    };
}

fn toggle_tag(form: &mut ExpenseForm, tags: &[TagView], tags_len: usize) {
    if tags_len == 0 {
        return;
    }
    let Some(tag) = tags.get(form.tag_cursor) else {
        return;
    };
    if let Some(position) = form.selected_tags.iter().position(|id| *id == tag.id) {
        form.selected_tags.remove(position);
    } else {
        form.selected_tags.push(tag.id);
    }
}

/// Formats centavos back into the plain `reais,centavos` text the amount
/// field expects when editing.
fn amount_input(amount_cents: i64) -> String {
    format!("{},{:02}", amount_cents / 100, amount_cents % 100)
}

fn message_for_error(err: ClientError) -> String {
    match err {
        ClientError::NotFound => "Registro não encontrado.".to_string(),
        ClientError::Validation(message) => format!("Erro de validação: {message}"),
        ClientError::Server(message) => format!("Erro no servidor: {message}"),
        ClientError::Transport(err) => format!("Servidor não acessível: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_stays_inside_the_list() {
        let mut selected = 0;
        select_next(&mut selected, 2);
        select_next(&mut selected, 2);
        select_next(&mut selected, 2);
        assert_eq!(selected, 1);

        select_prev(&mut selected);
        select_prev(&mut selected);
        assert_eq!(selected, 0);

        select_next(&mut selected, 0);
        assert_eq!(selected, 0);
    }

    #[test]
    fn picker_cycles_start_at_the_first_entry() {
        assert_eq!(cycle_option(None, 3, true), Some(0));
        assert_eq!(cycle_option(None, 3, false), Some(0));
        assert_eq!(cycle_option(Some(2), 3, true), Some(0));
        assert_eq!(cycle_option(Some(0), 3, false), Some(2));
        assert_eq!(cycle_option(Some(1), 0, true), None);
    }

    #[test]
    fn amount_input_round_trips_cents() {
        assert_eq!(amount_input(5000), "50,00");
        assert_eq!(amount_input(4990), "49,90");
        assert_eq!(amount_input(5), "0,05");
    }
}
