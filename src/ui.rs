use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use expense_ledger::{
    add_expense, by_category, by_month, check_budget, delete_expense, input::ValidationError,
    parse_amount, parse_budget, parse_date, parse_id, total_amount, BudgetReport, CategoryTotal,
    Expense, ExpenseStore, IdPolicy, NewExpense,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::io;

// ============================================================================
// MENU
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    AddExpense,
    ViewAll,
    ByCategory,
    ByMonth,
    CheckBudget,
    DeleteExpense,
    Exit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 7] = [
        MenuOption::AddExpense,
        MenuOption::ViewAll,
        MenuOption::ByCategory,
        MenuOption::ByMonth,
        MenuOption::CheckBudget,
        MenuOption::DeleteExpense,
        MenuOption::Exit,
    ];

    pub fn from_key(c: char) -> Option<Self> {
        let index = c.to_digit(10)? as usize;
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn number(&self) -> usize {
        Self::ALL.iter().position(|o| o == self).unwrap_or(0) + 1
    }

    pub fn title(&self) -> &str {
        match self {
            MenuOption::AddExpense => "Add expense",
            MenuOption::ViewAll => "View all expenses",
            MenuOption::ByCategory => "View by category",
            MenuOption::ByMonth => "View by month",
            MenuOption::CheckBudget => "Check budget",
            MenuOption::DeleteExpense => "Delete expense",
            MenuOption::Exit => "Exit",
        }
    }
}

// ============================================================================
// PROMPTS - one line of input per field
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Amount,
    Category,
    Description,
    Date,
    Month,
    Budget,
    ExpenseId,
}

impl Field {
    pub fn prompt(&self) -> &str {
        match self {
            Field::Amount => "Amount: $",
            Field::Category => "Category (food, transport, bills, entertainment, etc.): ",
            Field::Description => "Description: ",
            Field::Date => "Date (YYYY-MM-DD, blank for today): ",
            Field::Month => "Enter month (YYYY-MM, e.g., 2026-02): ",
            Field::Budget => "Enter your budget for this month: $",
            Field::ExpenseId => "Enter the ID of the expense to delete: ",
        }
    }

    /// Parse one submitted line into `answers`
    fn apply(&self, raw: &str, answers: &mut Answers) -> Result<(), ValidationError> {
        match self {
            Field::Amount => answers.amount = Some(parse_amount(raw)?),
            Field::Category => answers.category = Some(raw.trim().to_string()),
            Field::Description => answers.description = Some(raw.trim().to_string()),
            Field::Date => answers.date = Some(parse_date(raw)?),
            Field::Month => answers.month = Some(raw.trim().to_string()),
            Field::Budget => answers.budget = Some(parse_budget(raw)?),
            Field::ExpenseId => answers.id = Some(parse_id(raw)?),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Answers {
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub month: Option<String>,
    pub budget: Option<f64>,
    pub id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub action: MenuOption,
    pub fields: Vec<Field>,
    pub answers: Answers,
    /// (prompt, raw input) of fields already submitted
    pub history: Vec<(Field, String)>,
    pub input: String,
    /// Expenses shown above the prompt (delete picker)
    pub listing: Vec<Expense>,
}

impl Prompt {
    fn new(action: MenuOption, fields: Vec<Field>) -> Self {
        Self {
            action,
            fields,
            answers: Answers::default(),
            history: Vec::new(),
            input: String::new(),
            listing: Vec::new(),
        }
    }

    fn with_listing(mut self, listing: Vec<Expense>) -> Self {
        self.listing = listing;
        self
    }

    pub fn current_field(&self) -> Option<Field> {
        self.fields.get(self.history.len()).copied()
    }

    fn is_complete(&self) -> bool {
        self.history.len() >= self.fields.len()
    }
}

// ============================================================================
// APP STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Error,
    Info,
}

impl Tone {
    fn color(&self) -> Color {
        match self {
            Tone::Success => Color::Green,
            Tone::Warning => Color::Yellow,
            Tone::Error => Color::Red,
            Tone::Info => Color::Cyan,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub tone: Tone,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Menu,
    Prompt(Prompt),
    Expenses {
        title: String,
        expenses: Vec<Expense>,
        total: f64,
    },
    Categories {
        totals: Vec<CategoryTotal>,
        total: f64,
    },
    Budget(BudgetReport),
}

impl Screen {
    pub fn title(&self) -> String {
        match self {
            Screen::Menu => "Menu".to_string(),
            Screen::Prompt(prompt) => prompt.action.title().to_string(),
            Screen::Expenses { title, .. } => title.clone(),
            Screen::Categories { .. } => "Spending by Category".to_string(),
            Screen::Budget(report) => format!("Budget Report for {}", report.month),
        }
    }
}

pub struct App<S: ExpenseStore> {
    store: S,
    id_policy: IdPolicy,
    pub source: String,
    pub screen: Screen,
    pub status: Option<StatusMessage>,
    pub table_state: TableState,
    pub should_quit: bool,
}

impl<S: ExpenseStore> App<S> {
    pub fn new(store: S, id_policy: IdPolicy) -> Self {
        let source = store.describe();
        Self {
            store,
            id_policy,
            source,
            screen: Screen::Menu,
            status: None,
            table_state: TableState::default(),
            should_quit: false,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn set_status(&mut self, tone: Tone, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            tone,
            text: text.into(),
        });
    }

    fn back_to_menu(&mut self) {
        self.screen = Screen::Menu;
        self.table_state.select(None);
    }

    /// Leave the current screen with a status line
    fn return_to_menu(&mut self, tone: Tone, text: impl Into<String>) {
        self.back_to_menu();
        self.set_status(tone, text);
    }

    fn show_table(&mut self, screen: Screen) {
        self.table_state.select(Some(0));
        self.screen = screen;
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match self.screen {
            Screen::Menu => self.handle_menu_key(code),
            Screen::Prompt(_) => self.handle_prompt_key(code),
            _ => self.handle_view_key(code),
        }
    }

    fn handle_menu_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(c) => match MenuOption::from_key(c) {
                Some(option) => self.select(option),
                None => self.set_status(Tone::Warning, "Invalid choice. Try again."),
            },
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, code: KeyCode) {
        let Screen::Prompt(prompt) = &mut self.screen else {
            return;
        };

        match code {
            KeyCode::Char(c) => prompt.input.push(c),
            KeyCode::Backspace => {
                prompt.input.pop();
            }
            KeyCode::Esc => self.return_to_menu(Tone::Info, "Cancelled."),
            KeyCode::Enter => self.submit_field(),
            KeyCode::Down => self.next_row(),
            KeyCode::Up => self.previous_row(),
            _ => {}
        }
    }

    fn handle_view_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Down | KeyCode::Char('j') => self.next_row(),
            KeyCode::Up | KeyCode::Char('k') => self.previous_row(),
            KeyCode::Enter | KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => {
                self.status = None;
                self.back_to_menu();
            }
            _ => {}
        }
    }

    fn row_count(&self) -> usize {
        match &self.screen {
            Screen::Expenses { expenses, .. } => expenses.len(),
            Screen::Categories { totals, .. } => totals.len(),
            Screen::Prompt(prompt) => prompt.listing.len(),
            _ => 0,
        }
    }

    pub fn next_row(&mut self) {
        let len = self.row_count();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let len = self.row_count();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    // ========================================================================
    // ACTIONS
    // ========================================================================

    pub fn select(&mut self, option: MenuOption) {
        self.status = None;
        if let Err(e) = self.open(option) {
            self.return_to_menu(Tone::Error, format!("Error: {:#}", e));
        }
    }

    fn open(&mut self, option: MenuOption) -> Result<()> {
        match option {
            MenuOption::AddExpense => {
                self.screen = Screen::Prompt(Prompt::new(
                    option,
                    vec![Field::Amount, Field::Category, Field::Description, Field::Date],
                ));
            }
            MenuOption::ViewAll => {
                let expenses = self.store.load()?;
                if expenses.is_empty() {
                    self.set_status(Tone::Info, "No expenses recorded yet.");
                    return Ok(());
                }
                let total = total_amount(&expenses);
                self.show_table(Screen::Expenses {
                    title: "All Expenses".to_string(),
                    expenses,
                    total,
                });
            }
            MenuOption::ByCategory => {
                let totals = by_category(&self.store)?;
                if totals.is_empty() {
                    self.set_status(Tone::Info, "No expenses recorded yet.");
                    return Ok(());
                }
                let total = totals.iter().map(|t| t.total).sum();
                self.show_table(Screen::Categories { totals, total });
            }
            MenuOption::ByMonth | MenuOption::CheckBudget => {
                if self.store.load()?.is_empty() {
                    self.set_status(Tone::Info, "No expenses recorded yet.");
                    return Ok(());
                }
                let fields = if option == MenuOption::ByMonth {
                    vec![Field::Month]
                } else {
                    vec![Field::Month, Field::Budget]
                };
                self.screen = Screen::Prompt(Prompt::new(option, fields));
            }
            MenuOption::DeleteExpense => {
                let expenses = self.store.load()?;
                if expenses.is_empty() {
                    self.set_status(Tone::Info, "No expenses to delete.");
                    return Ok(());
                }
                self.table_state.select(Some(0));
                self.screen = Screen::Prompt(
                    Prompt::new(option, vec![Field::ExpenseId]).with_listing(expenses),
                );
            }
            MenuOption::Exit => {
                self.set_status(Tone::Info, "Goodbye!");
                self.should_quit = true;
            }
        }
        Ok(())
    }

    fn submit_field(&mut self) {
        let Screen::Prompt(prompt) = &mut self.screen else {
            return;
        };
        let Some(field) = prompt.current_field() else {
            return;
        };

        let raw = std::mem::take(&mut prompt.input);
        if let Err(err) = field.apply(&raw, &mut prompt.answers) {
            self.return_to_menu(Tone::Error, err.message);
            return;
        }
        prompt.history.push((field, raw));

        if !prompt.is_complete() {
            return;
        }

        let Screen::Prompt(prompt) = std::mem::replace(&mut self.screen, Screen::Menu) else {
            return;
        };
        if let Err(e) = self.finish(prompt) {
            self.return_to_menu(Tone::Error, format!("Error: {:#}", e));
        }
    }

    fn finish(&mut self, prompt: Prompt) -> Result<()> {
        let answers = prompt.answers;

        match prompt.action {
            MenuOption::AddExpense => {
                let amount = answers.amount.context("missing amount")?;
                let description = answers.description.unwrap_or_default();
                let new = NewExpense {
                    amount,
                    category: answers.category.unwrap_or_default(),
                    description: description.clone(),
                    date: answers.date,
                };
                add_expense(&self.store, new, self.id_policy)?;
                self.return_to_menu(
                    Tone::Success,
                    format!("✓ Expense added: ${:.2} - {}", amount, description),
                );
            }
            MenuOption::ByMonth => {
                let month = answers.month.unwrap_or_default();
                let report = by_month(&self.store, &month)?;
                if report.is_empty() {
                    self.return_to_menu(Tone::Warning, format!("No expenses found for {}.", report.month));
                    return Ok(());
                }
                self.show_table(Screen::Expenses {
                    title: format!("Expenses for {}", report.month),
                    total: report.total,
                    expenses: report.expenses,
                });
            }
            MenuOption::CheckBudget => {
                let month = answers.month.unwrap_or_default();
                let budget = answers.budget.context("missing budget")?;
                let report = check_budget(&self.store, &month, budget)?;
                self.screen = Screen::Budget(report);
            }
            MenuOption::DeleteExpense => {
                let id = answers.id.context("missing expense id")?;
                delete_expense(&self.store, id)?;
                self.return_to_menu(Tone::Success, format!("✓ Expense {} deleted.", id));
            }
            MenuOption::ViewAll | MenuOption::ByCategory | MenuOption::Exit => {
                self.back_to_menu();
            }
        }
        Ok(())
    }
}

// ============================================================================
// TERMINAL LOOP
// ============================================================================

pub fn run_ui<S: ExpenseStore>(app: &mut App<S>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("terminal UI failed")
}

fn run_app<B: ratatui::backend::Backend, S: ExpenseStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key.code);
            }
        }
    }
    Ok(())
}

// ============================================================================
// RENDERING
// ============================================================================

fn ui<S: ExpenseStore>(f: &mut Frame, app: &mut App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match &app.screen {
        Screen::Menu => render_menu(f, chunks[1]),
        Screen::Prompt(prompt) => render_prompt(f, chunks[1], prompt, &mut app.table_state),
        Screen::Expenses { title, expenses, total } => {
            render_expense_table(f, chunks[1], title, expenses, Some(*total), &mut app.table_state)
        }
        Screen::Categories { totals, total } => {
            render_categories(f, chunks[1], totals, *total, &mut app.table_state)
        }
        Screen::Budget(report) => render_budget(f, chunks[1], report),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header<S: ExpenseStore>(f: &mut Frame, area: Rect, app: &App<S>) {
    let spans = vec![
        Span::styled(
            "💰 Expense Tracker",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  │  "),
        Span::styled(app.screen.title(), Style::default().fg(Color::White)),
        Span::raw("  │  "),
        Span::styled(app.source.clone(), Style::default().fg(Color::DarkGray)),
    ];

    let header = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_menu(f: &mut Frame, area: Rect) {
    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  --- Expense Tracker ---",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for option in MenuOption::ALL {
        content.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                option.number().to_string(),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(format!(". {}", option.title())),
        ]));
    }

    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "  Choose an option (1-7)",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )));

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Menu "),
    );

    f.render_widget(paragraph, area);
}

fn render_prompt(f: &mut Frame, area: Rect, prompt: &Prompt, state: &mut TableState) {
    let prompt_height = prompt.fields.len() as u16 + 2;

    let prompt_area = if prompt.listing.is_empty() {
        area
    } else {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(prompt_height)])
            .split(area);
        render_expense_table(f, chunks[0], "All Expenses", &prompt.listing, None, state);
        chunks[1]
    };

    let mut lines: Vec<Line> = prompt
        .history
        .iter()
        .map(|(field, raw)| {
            Line::from(vec![
                Span::styled(field.prompt().to_string(), Style::default().fg(Color::DarkGray)),
                Span::styled(raw.clone(), Style::default().fg(Color::White)),
            ])
        })
        .collect();

    if let Some(field) = prompt.current_field() {
        lines.push(Line::from(vec![
            Span::styled(
                field.prompt().to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(prompt.input.clone()),
            Span::styled("█", Style::default().fg(Color::Yellow)),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {} ", prompt.action.title())),
        );

    f.render_widget(paragraph, prompt_area);
}

fn render_expense_table(
    f: &mut Frame,
    area: Rect,
    title: &str,
    expenses: &[Expense],
    total: Option<f64>,
    state: &mut TableState,
) {
    let header_cells = ["ID", "Date", "Category", "Amount", "Description"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = expenses.iter().map(|exp| {
        Row::new(vec![
            Cell::from(exp.id.to_string()),
            Cell::from(exp.date.clone()),
            Cell::from(truncate(&exp.category, 14)),
            Cell::from(format!("${:.2}", exp.amount)).style(Style::default().fg(Color::Red)),
            Cell::from(truncate(&exp.description, 40)),
        ])
        .height(1)
    });

    let title = match total {
        Some(total) => format!(" {} - Total: ${:.2} ", title, total),
        None => format!(" {} ", title),
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Length(12),
            Constraint::Length(16),
            Constraint::Length(12),
            Constraint::Min(20),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, state);
}

fn render_categories(
    f: &mut Frame,
    area: Rect,
    totals: &[CategoryTotal],
    grand_total: f64,
    state: &mut TableState,
) {
    let header_cells = ["Category", "Count", "Total"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = totals.iter().map(|t| {
        Row::new(vec![
            Cell::from(truncate(&t.category, 24)),
            Cell::from(t.count.to_string()),
            Cell::from(format!("${:.2}", t.total)).style(Style::default().fg(Color::Red)),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(26),
            Constraint::Length(8),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" Spending by Category - Total: ${:.2} ", grand_total)),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, state);
}

fn render_budget(f: &mut Frame, area: Rect, report: &BudgetReport) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let (verdict, color) = if report.over_budget {
        (format!("⚠ {}", report.message), Color::Red)
    } else {
        (format!("✓ {}", report.message), Color::Green)
    };

    let content = vec![
        Line::from(""),
        Line::from(format!("  Budget:        ${:.2}", report.budget)),
        Line::from(format!("  Spent:         ${:.2}", report.spent)),
        Line::from(vec![
            Span::raw("  Remaining:     "),
            Span::styled(
                format!("${:.2}", report.remaining),
                Style::default().fg(color),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", verdict),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ];

    let summary = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" Budget Report for {} ", report.month)),
    );
    f.render_widget(summary, chunks[0]);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Used "))
        .gauge_style(Style::default().fg(color))
        .ratio(report.progress)
        .label(format!("{:.1}%", report.percentage));
    f.render_widget(gauge, chunks[1]);
}

fn render_status_bar<S: ExpenseStore>(f: &mut Frame, area: Rect, app: &App<S>) {
    let mut spans = Vec::new();

    if let Some(status) = &app.status {
        spans.push(Span::styled(
            format!(" {} ", status.text),
            Style::default()
                .fg(status.tone.color())
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" | "));
    }

    let hints: &[(&str, &str)] = match app.screen {
        Screen::Menu => &[("1-7", " Choose | "), ("q", " Quit")],
        Screen::Prompt(_) => &[("Enter", " Submit | "), ("Esc", " Cancel")],
        _ => &[("↑/↓", " Nav | "), ("Enter/Esc", " Back")],
    };

    for (key, label) in hints {
        spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(*label));
    }

    let status_bar = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

// ============================================================================
// TESTS
// ============================================================================
