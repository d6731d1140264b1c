use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::sync::Arc;
use tracing::info;

use crate::api::FamilyRepository;
use crate::demo;
use crate::models::{
    DashboardStats, Family, FamilyRegistration, PhotoUpload, ProgressReport, ReportPeriod,
    SessionUser, UserRole,
};
use crate::progress::{care_score, care_score_clamped, PHOTO_TARGET};
use crate::search::{bucket_count, filter_families, DateBucket};

/// Plant stages offered on the photo upload screen
const PLANT_STAGES: [(&str, &str); 5] = [
    ("नया पौधा", "new"),
    ("बढ़ रहा है", "growing"),
    ("पत्तियां आ रही हैं", "leaves"),
    ("फूल आ रहे हैं", "flowering"),
    ("फल आ रहे हैं", "fruiting"),
];

/// Labels for the registration form, in field order
const REG_FIELD_LABELS: [&str; 17] = [
    "बच्चे का नाम *",
    "लिंग",
    "जन्म तिथि (DD/MM/YYYY)",
    "आयु *",
    "वज़न (किग्रा)",
    "लंबाई (सेमी)",
    "माता का नाम *",
    "पिता का नाम *",
    "मोबाइल नंबर *",
    "गाँव *",
    "वार्ड",
    "पंचायत",
    "जिला *",
    "ब्लॉक *",
    "वितरण तिथि (DD/MM/YYYY)",
    "पौधे की फोटो (फाइल पथ) *",
    "शपथ पत्र की फोटो (फाइल पथ) *",
];

/// Application views
#[derive(Debug, Clone, PartialEq)]
pub enum AppView {
    Login,
    RoleSelection,
    AdminDashboard,
    AnganwadiDashboard,
    FamilyDashboard,
    SearchFamilies,
    AddFamily,
    UploadPhoto,
    ProgressReport,
}

/// Field focus on the login screen
#[derive(Debug, Clone, Copy, PartialEq)]
enum LoginField {
    Username,
    Password,
}

/// Field focus on the upload screen
#[derive(Debug, Clone, Copy, PartialEq)]
enum UploadField {
    PhotoPath,
    Stage,
    Description,
}

/// Main application state
pub struct App {
    repo: Arc<dyn FamilyRepository>,
    demo_mode: bool,
    view: AppView,
    status_message: String,
    is_loading: bool,
    list_state: ListState,

    // Session
    session: Option<SessionUser>,

    // Login form
    login_username: String,
    login_password: String,
    login_field: LoginField,

    // Role selection
    role_index: usize,

    // Dashboards
    stats: Option<DashboardStats>,

    // Family dashboard
    my_family: Option<Family>,
    photo_count: u32,

    // Search screen
    base_families: Vec<Family>,
    filtered_families: Vec<Family>,
    search_query: String,
    selected_bucket: DateBucket,

    // Add-family form
    registration: FamilyRegistration,
    plant_photo_input: String,
    pledge_photo_input: String,
    reg_field: usize,
    confirm_pending: bool,

    // Upload form
    upload_photo_path: String,
    upload_stage: Option<usize>,
    upload_description: String,
    upload_field: UploadField,

    // Progress report
    report_period: ReportPeriod,
    report: Option<ProgressReport>,
    export_url: Option<String>,
}

impl App {
    /// Create a new application over the given data source
    pub fn new(repo: Arc<dyn FamilyRepository>, demo_mode: bool) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            repo,
            demo_mode,
            view: AppView::Login,
            status_message: if demo_mode {
                "डेमो मोड सक्रिय है".to_string()
            } else {
                "लॉगिन करें".to_string()
            },
            is_loading: false,
            list_state,
            session: None,
            login_username: String::new(),
            login_password: String::new(),
            login_field: LoginField::Username,
            role_index: 0,
            stats: None,
            my_family: None,
            photo_count: 0,
            base_families: Vec::new(),
            filtered_families: Vec::new(),
            search_query: String::new(),
            selected_bucket: DateBucket::All,
            registration: FamilyRegistration::default(),
            plant_photo_input: String::new(),
            pledge_photo_input: String::new(),
            reg_field: 0,
            confirm_pending: false,
            upload_photo_path: String::new(),
            upload_stage: None,
            upload_description: String::new(),
            upload_field: UploadField::PhotoPath,
            report_period: ReportPeriod::Week,
            report: None,
            export_url: None,
        }
    }

    /// Run the application
    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        io::stdout().execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_app(&mut terminal).await;

        disable_raw_mode()?;
        io::stdout().execute(LeaveAlternateScreen)?;

        result
    }

    /// Main application loop
    async fn run_app(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if let Event::Key(key) = event::read()? {
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                match self.view {
                    AppView::Login => match key.code {
                        KeyCode::Esc => return Ok(()),
                        KeyCode::Tab => {
                            self.login_field = match self.login_field {
                                LoginField::Username => LoginField::Password,
                                LoginField::Password => LoginField::Username,
                            };
                        }
                        KeyCode::Enter => {
                            // Submission is disabled while a request is in flight
                            if !self.is_loading {
                                self.submit_login().await;
                            }
                        }
                        KeyCode::Backspace => {
                            match self.login_field {
                                LoginField::Username => self.login_username.pop(),
                                LoginField::Password => self.login_password.pop(),
                            };
                        }
                        KeyCode::Char(c) => match self.login_field {
                            LoginField::Username => self.login_username.push(c),
                            LoginField::Password => self.login_password.push(c),
                        },
                        _ => {}
                    },
                    AppView::RoleSelection => match key.code {
                        KeyCode::Esc | KeyCode::Char('q') => {
                            self.logout();
                        }
                        KeyCode::Down => self.role_index = (self.role_index + 1) % 3,
                        KeyCode::Up => self.role_index = (self.role_index + 2) % 3,
                        KeyCode::Enter => {
                            let role = [UserRole::Admin, UserRole::Anganwadi, UserRole::Family]
                                [self.role_index];
                            self.open_dashboard(role).await;
                        }
                        _ => {}
                    },
                    AppView::AdminDashboard => match key.code {
                        KeyCode::Esc | KeyCode::Char('q') => self.view = AppView::RoleSelection,
                        KeyCode::Char('s') => self.open_search().await,
                        KeyCode::Char('r') => self.open_report().await,
                        _ => {}
                    },
                    AppView::AnganwadiDashboard => match key.code {
                        KeyCode::Esc | KeyCode::Char('q') => self.view = AppView::RoleSelection,
                        KeyCode::Char('a') => self.open_add_family(),
                        KeyCode::Char('s') => self.open_search().await,
                        KeyCode::Char('r') => self.open_report().await,
                        _ => {}
                    },
                    AppView::FamilyDashboard => match key.code {
                        KeyCode::Esc | KeyCode::Char('q') => self.view = AppView::RoleSelection,
                        KeyCode::Char('u') => self.open_upload(),
                        _ => {}
                    },
                    AppView::SearchFamilies => match key.code {
                        KeyCode::Esc => self.back_to_dashboard(),
                        KeyCode::Left => {
                            self.cycle_bucket(false);
                            self.apply_filters();
                        }
                        KeyCode::Right => {
                            self.cycle_bucket(true);
                            self.apply_filters();
                        }
                        KeyCode::Down => self.next_item(),
                        KeyCode::Up => self.previous_item(),
                        KeyCode::Backspace => {
                            self.search_query.pop();
                            self.apply_filters();
                        }
                        KeyCode::Char(c) => {
                            self.search_query.push(c);
                            self.apply_filters();
                        }
                        _ => {}
                    },
                    AppView::AddFamily => {
                        if self.confirm_pending {
                            match key.code {
                                KeyCode::Char('y') => {
                                    self.confirm_pending = false;
                                    if !self.is_loading {
                                        self.submit_registration().await;
                                    }
                                }
                                KeyCode::Char('n') | KeyCode::Esc => {
                                    self.confirm_pending = false;
                                    self.status_message = "पंजीकरण रद्द".to_string();
                                }
                                _ => {}
                            }
                        } else {
                            match key.code {
                                KeyCode::Esc => self.back_to_dashboard(),
                                KeyCode::Down | KeyCode::Tab => {
                                    self.reg_field = (self.reg_field + 1) % REG_FIELD_LABELS.len();
                                }
                                KeyCode::Up => {
                                    self.reg_field = (self.reg_field + REG_FIELD_LABELS.len() - 1)
                                        % REG_FIELD_LABELS.len();
                                }
                                KeyCode::Enter => self.request_registration_confirm(),
                                KeyCode::Backspace => {
                                    self.reg_field_mut().pop();
                                }
                                KeyCode::Char(c) => self.reg_field_mut().push(c),
                                _ => {}
                            }
                        }
                    }
                    AppView::UploadPhoto => match key.code {
                        KeyCode::Esc => self.view = AppView::FamilyDashboard,
                        KeyCode::Tab => {
                            self.upload_field = match self.upload_field {
                                UploadField::PhotoPath => UploadField::Stage,
                                UploadField::Stage => UploadField::Description,
                                UploadField::Description => UploadField::PhotoPath,
                            };
                        }
                        KeyCode::Left | KeyCode::Right if self.upload_field == UploadField::Stage => {
                            let len = PLANT_STAGES.len();
                            let current = self.upload_stage.unwrap_or(0);
                            self.upload_stage = Some(if key.code == KeyCode::Right {
                                (current + 1) % len
                            } else {
                                (current + len - 1) % len
                            });
                        }
                        KeyCode::Enter => {
                            if !self.is_loading {
                                self.submit_photo().await;
                            }
                        }
                        KeyCode::Backspace => {
                            match self.upload_field {
                                UploadField::PhotoPath => self.upload_photo_path.pop(),
                                UploadField::Description => self.upload_description.pop(),
                                UploadField::Stage => None,
                            };
                        }
                        KeyCode::Char(c) => match self.upload_field {
                            UploadField::PhotoPath => self.upload_photo_path.push(c),
                            UploadField::Description => self.upload_description.push(c),
                            UploadField::Stage => {}
                        },
                        _ => {}
                    },
                    AppView::ProgressReport => match key.code {
                        KeyCode::Esc => self.back_to_dashboard(),
                        KeyCode::Char('w') => self.load_report(ReportPeriod::Week).await,
                        KeyCode::Char('m') => self.load_report(ReportPeriod::Month).await,
                        KeyCode::Char('y') => self.load_report(ReportPeriod::Year).await,
                        KeyCode::Char('e') => self.export_report().await,
                        _ => {}
                    },
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Navigation and actions
    // ------------------------------------------------------------------

    fn logout(&mut self) {
        self.session = None;
        self.login_username.clear();
        self.login_password.clear();
        self.login_field = LoginField::Username;
        self.view = AppView::Login;
        self.status_message = "लॉगआउट हो गया".to_string();
    }

    /// Validate credentials and move to role selection
    async fn submit_login(&mut self) {
        if self.login_username.trim().is_empty() || self.login_password.is_empty() {
            self.status_message = "कृपया उपयोगकर्ता नाम और पासवर्ड भरें".to_string();
            return;
        }

        self.is_loading = true;
        self.status_message = "लॉगिन हो रहा है...".to_string();

        // Demo mode validates entirely client-side; otherwise ask the backend
        let outcome = if self.demo_mode {
            demo::validate_demo_credentials(&self.login_username, &self.login_password)
                .map_err(|e| e.to_string())
        } else {
            match self.repo.login(&self.login_username, &self.login_password).await {
                Ok(response) if response.success => response
                    .user
                    .ok_or_else(|| "सर्वर ने उपयोगकर्ता नहीं भेजा".to_string()),
                Ok(response) => Err(response.message),
                Err(e) => Err(e.to_string()),
            }
        };

        self.is_loading = false;
        match outcome {
            Ok(user) => {
                info!("login succeeded for {}", user.username);
                self.role_index = match user.role {
                    Some(UserRole::Admin) | None => 0,
                    Some(UserRole::Anganwadi) => 1,
                    Some(UserRole::Family) => 2,
                };
                self.status_message = format!("स्वागत है, {}", user.name);
                self.session = Some(user);
                self.view = AppView::RoleSelection;
            }
            Err(message) => {
                self.status_message = message;
            }
        }
    }

    /// Load the dashboard for the chosen role
    async fn open_dashboard(&mut self, role: UserRole) {
        match role {
            UserRole::Admin => {
                self.is_loading = true;
                self.status_message = "आंकड़े लोड हो रहे हैं...".to_string();
                match self.repo.dashboard_stats(None).await {
                    Ok(stats) => {
                        self.stats = Some(stats);
                        self.status_message = "तैयार".to_string();
                    }
                    Err(e) => self.status_message = e.to_string(),
                }
                self.is_loading = false;
                self.view = AppView::AdminDashboard;
            }
            UserRole::Anganwadi => {
                self.is_loading = true;
                self.status_message = "आंकड़े लोड हो रहे हैं...".to_string();
                let center = self.center_code();
                match self.repo.dashboard_stats(center.as_deref()).await {
                    Ok(stats) => {
                        self.stats = Some(stats);
                        self.status_message = "तैयार".to_string();
                    }
                    Err(e) => self.status_message = e.to_string(),
                }
                self.is_loading = false;
                self.view = AppView::AnganwadiDashboard;
            }
            UserRole::Family => {
                self.refresh_my_family().await;
                self.view = AppView::FamilyDashboard;
            }
        }
    }

    /// Fetch the logged-in family's record; the fetched photo count
    /// supersedes any provisional local value.
    async fn refresh_my_family(&mut self) {
        self.is_loading = true;
        let user_id = self
            .session
            .as_ref()
            .and_then(|u| u.id.clone())
            .unwrap_or_default();
        match self.repo.family_by_user(&user_id).await {
            Ok(family) => {
                self.photo_count = family.total_images_yet.unwrap_or(0);
                self.my_family = Some(family);
                self.status_message = "तैयार".to_string();
            }
            Err(e) => {
                self.status_message = e.to_string();
            }
        }
        self.is_loading = false;
    }

    fn center_code(&self) -> Option<String> {
        self.session.as_ref().and_then(|u| {
            if u.role == Some(UserRole::Anganwadi) && !u.center_code.is_empty() {
                Some(u.center_code.clone())
            } else {
                None
            }
        })
    }

    fn back_to_dashboard(&mut self) {
        self.view = match self.session.as_ref().and_then(|u| u.role) {
            Some(UserRole::Admin) => AppView::AdminDashboard,
            Some(UserRole::Family) => AppView::FamilyDashboard,
            _ => AppView::AnganwadiDashboard,
        };
    }

    /// Load the base family list and reset the search state
    async fn open_search(&mut self) {
        self.is_loading = true;
        self.status_message = "परिवार लोड हो रहे हैं...".to_string();
        let center = self.center_code();
        match self.repo.families(center.as_deref()).await {
            Ok(families) => {
                self.base_families = families;
                self.search_query.clear();
                self.selected_bucket = DateBucket::All;
                self.apply_filters();
                self.status_message = format!("{} परिवार मिले", self.filtered_families.len());
            }
            Err(e) => self.status_message = e.to_string(),
        }
        self.is_loading = false;
        self.view = AppView::SearchFamilies;
    }

    /// Recompute the filtered list from the base list. Pure and synchronous,
    /// run on every keystroke and chip change.
    fn apply_filters(&mut self) {
        let today = Local::now().date_naive();
        self.filtered_families = filter_families(
            &self.base_families,
            &self.search_query,
            self.selected_bucket,
            today,
        );
        self.list_state = ListState::default();
        if !self.filtered_families.is_empty() {
            self.list_state.select(Some(0));
        }
        self.status_message = format!("{} परिवार मिले", self.filtered_families.len());
    }

    fn cycle_bucket(&mut self, forward: bool) {
        let chips = DateBucket::CHIPS;
        let current = chips
            .iter()
            .position(|b| *b == self.selected_bucket)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % chips.len()
        } else {
            (current + chips.len() - 1) % chips.len()
        };
        self.selected_bucket = chips[next];
    }

    fn open_add_family(&mut self) {
        let mut registration = FamilyRegistration {
            gender: "लड़का".to_string(),
            registration_date: Local::now().date_naive().format("%d/%m/%Y").to_string(),
            ..Default::default()
        };
        if let Some(user) = &self.session {
            registration.center_name = user.center_name.clone();
            registration.center_code = user.center_code.clone();
            registration.worker_name = user.name.clone();
            registration.block = user.block.clone();
            registration.district = user.district.clone();
        }
        self.registration = registration;
        self.plant_photo_input.clear();
        self.pledge_photo_input.clear();
        self.reg_field = 0;
        self.confirm_pending = false;
        self.view = AppView::AddFamily;
        self.status_message = "फॉर्म भरें (↑/↓ फील्ड बदलें, Enter सबमिट)".to_string();
    }

    fn reg_field_mut(&mut self) -> &mut String {
        let r = &mut self.registration;
        match self.reg_field {
            0 => &mut r.child_name,
            1 => &mut r.gender,
            2 => &mut r.date_of_birth,
            3 => &mut r.age,
            4 => &mut r.weight,
            5 => &mut r.height,
            6 => &mut r.mother_name,
            7 => &mut r.father_name,
            8 => &mut r.mobile_number,
            9 => &mut r.village,
            10 => &mut r.ward,
            11 => &mut r.panchayat,
            12 => &mut r.district,
            13 => &mut r.block,
            14 => &mut r.distribution_date,
            15 => &mut self.plant_photo_input,
            _ => &mut self.pledge_photo_input,
        }
    }

    fn reg_field_value(&self, index: usize) -> &str {
        let r = &self.registration;
        match index {
            0 => &r.child_name,
            1 => &r.gender,
            2 => &r.date_of_birth,
            3 => &r.age,
            4 => &r.weight,
            5 => &r.height,
            6 => &r.mother_name,
            7 => &r.father_name,
            8 => &r.mobile_number,
            9 => &r.village,
            10 => &r.ward,
            11 => &r.panchayat,
            12 => &r.district,
            13 => &r.block,
            14 => &r.distribution_date,
            15 => &self.plant_photo_input,
            _ => &self.pledge_photo_input,
        }
    }

    /// Required-field and photo-presence validation, then ask to confirm
    fn request_registration_confirm(&mut self) {
        let r = &self.registration;
        let required = [
            &r.child_name,
            &r.age,
            &r.mother_name,
            &r.father_name,
            &r.mobile_number,
            &r.village,
            &r.district,
            &r.block,
        ];
        if required.iter().any(|f| f.trim().is_empty()) {
            self.status_message = "कृपया सभी आवश्यक फील्ड भरें".to_string();
            return;
        }
        if self.plant_photo_input.trim().is_empty() {
            self.status_message = "कृपया पौधे की फोटो अपलोड करें".to_string();
            return;
        }
        if self.pledge_photo_input.trim().is_empty() {
            self.status_message = "कृपया शपथ पत्र की फोटो अपलोड करें".to_string();
            return;
        }
        self.confirm_pending = true;
        self.status_message = "पंजीकरण की पुष्टि करें (y/n)".to_string();
    }

    async fn submit_registration(&mut self) {
        self.is_loading = true;
        self.status_message = "पंजीकरण हो रहा है...".to_string();

        let mut registration = self.registration.clone();
        registration.plant_photo = Some(self.plant_photo_input.trim().into());
        registration.pledge_photo = Some(self.pledge_photo_input.trim().into());

        match self.repo.register_family(&registration).await {
            Ok(response) if response.success => {
                self.status_message = response.message;
                self.back_to_dashboard();
            }
            Ok(response) => self.status_message = response.message,
            Err(e) => {
                self.status_message =
                    format!("पंजीकरण में समस्या हुई, कृपया दोबारा कोशिश करें ({})", e);
            }
        }
        self.is_loading = false;
    }

    fn open_upload(&mut self) {
        self.upload_photo_path.clear();
        self.upload_stage = None;
        self.upload_description.clear();
        self.upload_field = UploadField::PhotoPath;
        self.view = AppView::UploadPhoto;
        self.status_message = "फोटो का पथ भरें (Tab फील्ड बदलें)".to_string();
    }

    /// Upload a photo, bump the local count optimistically, then refetch the
    /// family record so the server value wins.
    async fn submit_photo(&mut self) {
        if self.upload_photo_path.trim().is_empty() {
            self.status_message = "कृपया एक फोटो चुनें।".to_string();
            return;
        }
        let Some(stage_index) = self.upload_stage else {
            self.status_message = "कृपया पौधे की अवस्था चुनें।".to_string();
            return;
        };
        let Some(family) = self.my_family.clone() else {
            self.status_message = "परिवार की जानकारी उपलब्ध नहीं है".to_string();
            return;
        };

        self.is_loading = true;
        self.status_message = "फोटो अपलोड हो रहा है...".to_string();

        let upload = PhotoUpload {
            family_id: family.id.clone(),
            plant_stage: PLANT_STAGES[stage_index].1.to_string(),
            description: if self.upload_description.trim().is_empty() {
                None
            } else {
                Some(self.upload_description.trim().to_string())
            },
            photo_uri: self.upload_photo_path.trim().to_string(),
        };

        match self.repo.upload_photo(&upload).await {
            Ok(response) if response.success => {
                // Provisional value until the refetch below succeeds
                self.photo_count += 1;
                self.refresh_my_family().await;
                self.status_message =
                    "फोटो सफलतापूर्वक अपलोड हो गया है! आपकी देखभाल स्कोर बढ़ गया है।".to_string();
                self.view = AppView::FamilyDashboard;
            }
            Ok(response) => self.status_message = response.message,
            Err(e) => self.status_message = e.to_string(),
        }
        self.is_loading = false;
    }

    async fn open_report(&mut self) {
        self.export_url = None;
        self.load_report(ReportPeriod::Week).await;
        self.view = AppView::ProgressReport;
    }

    async fn load_report(&mut self, period: ReportPeriod) {
        self.is_loading = true;
        self.report_period = period;
        self.status_message = "रिपोर्ट लोड हो रही है...".to_string();
        let center = self.center_code();
        match self.repo.progress_report(period, center.as_deref()).await {
            Ok(report) => {
                self.report = Some(report);
                self.status_message = "तैयार".to_string();
            }
            Err(e) => self.status_message = e.to_string(),
        }
        self.is_loading = false;
    }

    async fn export_report(&mut self) {
        if self.is_loading {
            return;
        }
        self.is_loading = true;
        self.status_message = "रिपोर्ट निर्यात हो रही है...".to_string();
        let center = self.center_code();
        match self
            .repo
            .export_report(self.report_period, center.as_deref())
            .await
        {
            Ok(response) if response.success => {
                self.status_message = format!("डाउनलोड लिंक: {}", response.download_url);
                self.export_url = Some(response.download_url);
            }
            Ok(response) => self.status_message = response.message,
            Err(e) => self.status_message = e.to_string(),
        }
        self.is_loading = false;
    }

    /// Move to next item in the search result list
    fn next_item(&mut self) {
        let max_index = self.filtered_families.len();
        if max_index > 0 {
            let i = match self.list_state.selected() {
                Some(i) if i >= max_index - 1 => 0,
                Some(i) => i + 1,
                None => 0,
            };
            self.list_state.select(Some(i));
        }
    }

    /// Move to previous item in the search result list
    fn previous_item(&mut self) {
        let max_index = self.filtered_families.len();
        if max_index > 0 {
            let i = match self.list_state.selected() {
                Some(0) | None => max_index - 1,
                Some(i) => i - 1,
            };
            self.list_state.select(Some(i));
        }
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    fn render(&mut self, f: &mut Frame) {
        match self.view {
            AppView::Login => self.render_login(f),
            AppView::RoleSelection => self.render_role_selection(f),
            AppView::AdminDashboard => self.render_admin_dashboard(f),
            AppView::AnganwadiDashboard => self.render_anganwadi_dashboard(f),
            AppView::FamilyDashboard => self.render_family_dashboard(f),
            AppView::SearchFamilies => self.render_search(f),
            AppView::AddFamily => self.render_add_family(f),
            AppView::UploadPhoto => self.render_upload(f),
            AppView::ProgressReport => self.render_report(f),
        }
    }

    fn chrome(&self, f: &mut Frame, title: &str) -> Rect {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(f.area());

        let title_widget = Paragraph::new(title.to_string())
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD));
        f.render_widget(title_widget, chunks[0]);

        let status = Paragraph::new(self.status_message.as_str())
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Gray));
        f.render_widget(status, chunks[2]);

        chunks[1]
    }

    fn render_login(&mut self, f: &mut Frame) {
        let area = self.chrome(f, "🌱 हर घर मुंगा - लॉगिन");

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);

        let focused = Style::default().fg(Color::Green);
        let unfocused = Style::default().fg(Color::White);

        let username = Paragraph::new(self.login_username.as_str())
            .block(Block::default().borders(Borders::ALL).title("उपयोगकर्ता नाम"))
            .style(if self.login_field == LoginField::Username {
                focused
            } else {
                unfocused
            });
        f.render_widget(username, chunks[0]);

        let masked = "*".repeat(self.login_password.chars().count());
        let password = Paragraph::new(masked)
            .block(Block::default().borders(Borders::ALL).title("पासवर्ड"))
            .style(if self.login_field == LoginField::Password {
                focused
            } else {
                unfocused
            });
        f.render_widget(password, chunks[1]);

        let mut help_lines = vec![
            Line::from(""),
            Line::from("Tab: फील्ड बदलें | Enter: लॉगिन | Esc: बाहर निकलें"),
        ];
        if self.demo_mode {
            help_lines.push(Line::from(""));
            help_lines.push(Line::from(Span::styled(
                "डेमो उपयोगकर्ता: CGCO001 / CGAB001 / CGPV001",
                Style::default().fg(Color::Yellow),
            )));
        }
        let help = Paragraph::new(help_lines)
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(help, chunks[2]);
    }

    fn render_role_selection(&mut self, f: &mut Frame) {
        let area = self.chrome(f, "भूमिका चुनें");

        let roles = [
            ("प्रशासक", "जिले के आंकड़े और रिपोर्ट"),
            ("आंगनबाड़ी कार्यकर्ता", "पंजीकरण, खोज और रिपोर्ट"),
            ("परिवार", "पौधे की देखभाल और फोटो अपलोड"),
        ];

        let items: Vec<ListItem> = roles
            .iter()
            .enumerate()
            .map(|(i, (name, desc))| {
                let style = if i == self.role_index {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(vec![
                    Line::from(Span::styled(*name, style)),
                    Line::from(Span::styled(
                        format!("   {}", desc),
                        Style::default().fg(Color::Gray),
                    )),
                ])
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title("↑/↓ चुनें, Enter खोलें, q लॉगआउट"),
        );
        f.render_widget(list, area);
    }

    fn stats_lines(&self) -> Vec<Line<'_>> {
        let mut lines = vec![Line::from("")];
        if let Some(stats) = &self.stats {
            lines.extend(vec![
                Line::from(vec![
                    Span::raw("  कुल परिवार: "),
                    Span::styled(
                        stats.total_families.to_string(),
                        Style::default().fg(Color::Green),
                    ),
                ]),
                Line::from(vec![
                    Span::raw("  वितरित पौधे: "),
                    Span::styled(
                        stats.distributed_plants.to_string(),
                        Style::default().fg(Color::Green),
                    ),
                ]),
                Line::from(vec![
                    Span::raw("  सक्रिय परिवार: "),
                    Span::styled(
                        stats.active_families.to_string(),
                        Style::default().fg(Color::Green),
                    ),
                ]),
                Line::from(vec![
                    Span::raw("  सफलता दर: "),
                    Span::styled(
                        format!("{}%", stats.success_rate),
                        Style::default().fg(Color::Yellow),
                    ),
                ]),
                Line::from(""),
                Line::from("  हाल की गतिविधियां:"),
            ]);
            for activity in &stats.recent_activities {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {} ", activity.date),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::raw(activity.activity.clone()),
                ]));
            }
        } else {
            lines.push(Line::from("  आंकड़े उपलब्ध नहीं हैं"));
        }
        lines
    }

    fn render_admin_dashboard(&mut self, f: &mut Frame) {
        let area = self.chrome(f, "📊 प्रशासक डैशबोर्ड");
        let mut lines = self.stats_lines();
        lines.extend(vec![
            Line::from(""),
            Line::from("  s - परिवार खोजें | r - प्रगति रिपोर्ट | q - वापस"),
        ]);
        let content = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        f.render_widget(content, area);
    }

    fn render_anganwadi_dashboard(&mut self, f: &mut Frame) {
        let title = match &self.session {
            Some(user) if !user.center_name.is_empty() => {
                format!("🏠 {} ({})", user.center_name, user.center_code)
            }
            _ => "🏠 आंगनबाड़ी डैशबोर्ड".to_string(),
        };
        let area = self.chrome(f, &title);
        let mut lines = self.stats_lines();
        lines.extend(vec![
            Line::from(""),
            Line::from("  a - नया परिवार जोड़ें | s - परिवार खोजें | r - प्रगति रिपोर्ट | q - वापस"),
        ]);
        let content = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        f.render_widget(content, area);
    }

    fn render_family_dashboard(&mut self, f: &mut Frame) {
        let area = self.chrome(f, "🌱 मेरा मूंगा");

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        let mut lines = vec![Line::from("")];
        if let Some(family) = &self.my_family {
            lines.extend(vec![
                Line::from(vec![
                    Span::raw("  परिवार: "),
                    Span::styled(
                        family.parent_name.clone(),
                        Style::default().fg(Color::Green),
                    ),
                ]),
                Line::from(vec![
                    Span::raw("  बच्चा: "),
                    Span::raw(family.child_name.clone()),
                ]),
                Line::from(vec![
                    Span::raw("  गाँव: "),
                    Span::raw(family.village.clone()),
                ]),
                Line::from(vec![
                    Span::raw("  पंजीकरण: "),
                    Span::styled(
                        family.registration_date.clone(),
                        Style::default().fg(Color::Gray),
                    ),
                ]),
            ]);
        } else {
            lines.push(Line::from("  परिवार की जानकारी उपलब्ध नहीं है"));
        }
        lines.extend(vec![
            Line::from(""),
            Line::from(vec![
                Span::raw("  कुल फोटो: "),
                Span::styled(
                    format!("{} / {}", self.photo_count, PHOTO_TARGET),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw("   देखभाल स्कोर: "),
                Span::styled(
                    format!("{}%", care_score(self.photo_count)),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from("  u - फोटो अपलोड | q - वापस"),
        ]);

        let content = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        f.render_widget(content, chunks[0]);

        // The gauge renders the clamped score; the raw value may exceed 100
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("देखभाल स्कोर"))
            .gauge_style(Style::default().fg(Color::Green))
            .percent(care_score_clamped(self.photo_count) as u16);
        f.render_widget(gauge, chunks[1]);
    }

    fn render_search(&mut self, f: &mut Frame) {
        let area = self.chrome(f, "🔍 परिवार खोजें");

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);

        let input = Paragraph::new(self.search_query.as_str())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("परिवार खोजें (नाम, मोबाइल, गाँव)"),
            )
            .style(Style::default().fg(Color::White));
        f.render_widget(input, chunks[0]);

        // Filter chips with counts over the unfiltered base list
        let today = Local::now().date_naive();
        let mut chip_spans = vec![Span::raw(" ")];
        for bucket in DateBucket::CHIPS {
            let label = format!(
                "{} ({})",
                bucket.label(),
                bucket_count(&self.base_families, bucket, today)
            );
            let style = if bucket == self.selected_bucket {
                Style::default().fg(Color::Black).bg(Color::Green)
            } else {
                Style::default().fg(Color::Gray)
            };
            chip_spans.push(Span::styled(format!(" {} ", label), style));
            chip_spans.push(Span::raw(" "));
        }
        let chips = Paragraph::new(Line::from(chip_spans))
            .block(Block::default().borders(Borders::ALL).title("फिल्टर (←/→)"));
        f.render_widget(chips, chunks[1]);

        if self.filtered_families.is_empty() {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from("  कोई परिवार नहीं मिला"),
                Line::from("  कृपया अलग शब्दों से खोजें या फिल्टर बदलें"),
            ])
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Red));
            f.render_widget(empty, chunks[2]);
        } else {
            let items: Vec<ListItem> = self
                .filtered_families
                .iter()
                .map(|family| {
                    let mut first = vec![
                        Span::styled(
                            family.child_name.clone(),
                            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(" - माता/पिता: "),
                        Span::raw(family.parent_name.clone()),
                    ];
                    if family.plant_distributed {
                        first.push(Span::styled(
                            "  [पौधा मिला]",
                            Style::default().fg(Color::Green),
                        ));
                    }
                    ListItem::new(vec![
                        Line::from(first),
                        Line::from(vec![
                            Span::raw("   गाँव: "),
                            Span::raw(family.village.clone()),
                            Span::raw(" | पंजीकरण: "),
                            Span::styled(
                                family.registration_date.clone(),
                                Style::default().fg(Color::Gray),
                            ),
                            Span::raw(" | "),
                            Span::styled(
                                family.mobile_number.clone(),
                                Style::default().fg(Color::Green),
                            ),
                        ]),
                    ])
                })
                .collect();

            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(format!(
                    "{} परिवार मिले",
                    self.filtered_families.len()
                )))
                .highlight_style(
                    Style::default()
                        .bg(Color::LightGreen)
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("→ ");
            f.render_stateful_widget(list, chunks[2], &mut self.list_state);
        }
    }

    fn render_add_family(&mut self, f: &mut Frame) {
        let area = self.chrome(f, "👶 नया परिवार जोड़ें");

        let items: Vec<ListItem> = REG_FIELD_LABELS
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let value = self.reg_field_value(i);
                let style = if i == self.reg_field {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<28}", label), style),
                    Span::raw(value.to_string()),
                ]))
            })
            .collect();

        let title = if self.confirm_pending {
            "पंजीकरण की पुष्टि करें (y/n)"
        } else {
            "↑/↓ फील्ड बदलें | Enter: सबमिट | Esc: वापस"
        };
        let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(list, area);
    }

    fn render_upload(&mut self, f: &mut Frame) {
        let area = self.chrome(f, "📸 पौधे का फोटो अपलोड करें");

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);

        let focused = Style::default().fg(Color::Green);
        let unfocused = Style::default().fg(Color::White);

        let path = Paragraph::new(self.upload_photo_path.as_str())
            .block(Block::default().borders(Borders::ALL).title("फोटो (फाइल पथ)"))
            .style(if self.upload_field == UploadField::PhotoPath {
                focused
            } else {
                unfocused
            });
        f.render_widget(path, chunks[0]);

        let stage_label = self
            .upload_stage
            .map(|i| PLANT_STAGES[i].0)
            .unwrap_or("← / → से चुनें");
        let stage = Paragraph::new(stage_label)
            .block(Block::default().borders(Borders::ALL).title("पौधे की अवस्था"))
            .style(if self.upload_field == UploadField::Stage {
                focused
            } else {
                unfocused
            });
        f.render_widget(stage, chunks[1]);

        let description = Paragraph::new(self.upload_description.as_str())
            .block(Block::default().borders(Borders::ALL).title("विवरण (वैकल्पिक)"))
            .style(if self.upload_field == UploadField::Description {
                focused
            } else {
                unfocused
            });
        f.render_widget(description, chunks[2]);

        let help = Paragraph::new(vec![
            Line::from(""),
            Line::from("Tab: फील्ड बदलें | Enter: अपलोड | Esc: वापस"),
        ])
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(help, chunks[3]);
    }

    fn render_report(&mut self, f: &mut Frame) {
        let area = self.chrome(f, "📈 प्रगति रिपोर्ट");

        let mut lines = vec![Line::from("")];
        let periods = [
            (ReportPeriod::Week, "सप्ताह (w)"),
            (ReportPeriod::Month, "महीना (m)"),
            (ReportPeriod::Year, "वर्ष (y)"),
        ];
        let mut period_spans = vec![Span::raw("  ")];
        for (period, label) in periods {
            let style = if period == self.report_period {
                Style::default().fg(Color::Black).bg(Color::Green)
            } else {
                Style::default().fg(Color::Gray)
            };
            period_spans.push(Span::styled(format!(" {} ", label), style));
            period_spans.push(Span::raw(" "));
        }
        lines.push(Line::from(period_spans));
        lines.push(Line::from(""));

        if let Some(report) = &self.report {
            lines.extend(vec![
                Line::from(vec![
                    Span::raw("  कुल परिवार: "),
                    Span::styled(
                        report.total_families.to_string(),
                        Style::default().fg(Color::Green),
                    ),
                    Span::raw("   वितरित पौधे: "),
                    Span::styled(
                        report.distributed_plants.to_string(),
                        Style::default().fg(Color::Green),
                    ),
                ]),
                Line::from(vec![
                    Span::raw("  सफलता दर: "),
                    Span::styled(
                        format!("{}%", report.success_rate),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::raw("   नए जुड़े: "),
                    Span::styled(
                        report.new_added.to_string(),
                        Style::default().fg(Color::Yellow),
                    ),
                ]),
                Line::from(""),
                Line::from("  गतिविधियां:"),
            ]);
            for activity in &report.activities {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {} ", activity.date),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::raw(activity.activity.clone()),
                ]));
            }
        } else {
            lines.push(Line::from("  रिपोर्ट उपलब्ध नहीं है"));
        }

        if let Some(url) = &self.export_url {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::raw("  निर्यात: "),
                Span::styled(url.clone(), Style::default().fg(Color::Cyan)),
            ]));
        }

        lines.extend(vec![
            Line::from(""),
            Line::from("  w/m/y - अवधि बदलें | e - निर्यात | Esc - वापस"),
        ]);

        let content = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        f.render_widget(content, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FixtureRepository;
    use chrono::NaiveDate;

    fn demo_app() -> App {
        let repo = Arc::new(FixtureRepository::with_today(
            NaiveDate::from_ymd_opt(2025, 7, 13).unwrap(),
        ));
        App::new(repo, true)
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let mut app = demo_app();
        app.login_username = "CGAB001".to_string();
        app.login_password = "wrong".to_string();
        app.submit_login().await;
        assert_eq!(app.view, AppView::Login);
        assert_eq!(app.status_message, "गलत पासवर्ड!");
    }

    #[tokio::test]
    async fn test_login_moves_to_role_selection() {
        let mut app = demo_app();
        app.login_username = "cgab001".to_string();
        app.login_password = demo::DEMO_PASSWORD.to_string();
        app.submit_login().await;
        assert_eq!(app.view, AppView::RoleSelection);
        assert_eq!(app.role_index, 1);
        assert!(app.session.is_some());
    }

    #[tokio::test]
    async fn test_search_filters_recompute_on_query_change() {
        let mut app = demo_app();
        app.open_search().await;
        assert_eq!(app.filtered_families.len(), 6);

        app.search_query = "शिवपुर".to_string();
        app.apply_filters();
        assert_eq!(app.filtered_families.len(), 3);

        app.search_query.clear();
        app.apply_filters();
        assert_eq!(app.filtered_families.len(), 6);
    }

    #[tokio::test]
    async fn test_photo_upload_refetch_supersedes_optimistic_count() {
        let mut app = demo_app();
        app.session = demo::find_demo_user("CGPV001");
        app.refresh_my_family().await;
        assert_eq!(app.photo_count, 4);

        app.upload_photo_path = "/tmp/plant.jpg".to_string();
        app.upload_stage = Some(1);
        app.submit_photo().await;

        // Fixture backend incremented the stored count; the refetched value
        // matches the provisional one here.
        assert_eq!(app.photo_count, 5);
        assert_eq!(app.view, AppView::FamilyDashboard);
    }

    #[tokio::test]
    async fn test_registration_validation_blocks_missing_fields() {
        let mut app = demo_app();
        app.open_add_family();
        app.request_registration_confirm();
        assert!(!app.confirm_pending);
        assert_eq!(app.status_message, "कृपया सभी आवश्यक फील्ड भरें");
    }
}
