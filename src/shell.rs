use serde::{Deserialize, Serialize};

use crate::model::{AttendanceSheet, School};

/// Shell roles. These are the roles that own a menu family and a landing
/// view; the backend `user_role` enum additionally knows `staff`, which
/// never signs into the shell (see [`crate::model::AccountRole`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SchoolAdmin,
    Teacher,
    Student,
    Parent,
}

impl Role {
    pub fn parse(raw: &str) -> Option<Role> {
        match raw {
            "school_admin" => Some(Role::SchoolAdmin),
            "teacher" => Some(Role::Teacher),
            "student" => Some(Role::Student),
            "parent" => Some(Role::Parent),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::SchoolAdmin => "school_admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
            Role::Parent => "parent",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::SchoolAdmin => "School Admin",
            Role::Teacher => "Teacher",
            Role::Student => "Student",
            Role::Parent => "Parent",
        }
    }

    pub fn initials(self) -> &'static str {
        match self {
            Role::SchoolAdmin => "SA",
            Role::Teacher => "T",
            Role::Student => "S",
            Role::Parent => "P",
        }
    }

    /// Parents browse the student menu; they differ only in landing view.
    pub fn family(self) -> MenuFamily {
        match self {
            Role::SchoolAdmin => MenuFamily::Admin,
            Role::Teacher => MenuFamily::Teacher,
            Role::Student | Role::Parent => MenuFamily::Student,
        }
    }

    pub fn default_view(self) -> ViewKey {
        match self {
            Role::SchoolAdmin => ViewKey::Admin(AdminView::Dashboard),
            Role::Teacher => ViewKey::Teacher(TeacherView::Dashboard),
            Role::Student => ViewKey::Student(StudentView::Dashboard),
            Role::Parent => ViewKey::Student(StudentView::ParentDashboard),
        }
    }

    /// School admins sign in without picking a school; everyone else must.
    pub fn requires_school(self) -> bool {
        !matches!(self, Role::SchoolAdmin)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminView {
    Dashboard,
    Students,
    Staff,
    Attendance,
    Grades,
    Timetable,
    Exams,
    Syllabus,
    Certificates,
    Fees,
    Payments,
    Payroll,
    Accounts,
    Transport,
    Library,
    Enquiries,
    Admissions,
    Analytics,
    Reports,
    Settings,
}

impl AdminView {
    pub fn parse(raw: &str) -> Option<AdminView> {
        match raw {
            "dashboard" => Some(AdminView::Dashboard),
            "students" => Some(AdminView::Students),
            "staff" => Some(AdminView::Staff),
            "attendance" => Some(AdminView::Attendance),
            "grades" => Some(AdminView::Grades),
            "timetable" => Some(AdminView::Timetable),
            "exams" => Some(AdminView::Exams),
            "syllabus" => Some(AdminView::Syllabus),
            "certificates" => Some(AdminView::Certificates),
            "fees" => Some(AdminView::Fees),
            "payments" => Some(AdminView::Payments),
            "payroll" => Some(AdminView::Payroll),
            "accounts" => Some(AdminView::Accounts),
            "transport" => Some(AdminView::Transport),
            "library" => Some(AdminView::Library),
            "enquiries" => Some(AdminView::Enquiries),
            "admissions" => Some(AdminView::Admissions),
            "analytics" => Some(AdminView::Analytics),
            "reports" => Some(AdminView::Reports),
            "settings" => Some(AdminView::Settings),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AdminView::Dashboard => "dashboard",
            AdminView::Students => "students",
            AdminView::Staff => "staff",
            AdminView::Attendance => "attendance",
            AdminView::Grades => "grades",
            AdminView::Timetable => "timetable",
            AdminView::Exams => "exams",
            AdminView::Syllabus => "syllabus",
            AdminView::Certificates => "certificates",
            AdminView::Fees => "fees",
            AdminView::Payments => "payments",
            AdminView::Payroll => "payroll",
            AdminView::Accounts => "accounts",
            AdminView::Transport => "transport",
            AdminView::Library => "library",
            AdminView::Enquiries => "enquiries",
            AdminView::Admissions => "admissions",
            AdminView::Analytics => "analytics",
            AdminView::Reports => "reports",
            AdminView::Settings => "settings",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeacherView {
    Dashboard,
    Attendance,
    Timetable,
    Classes,
    Grades,
    Homework,
    Syllabus,
    Lessons,
    Messages,
    Activities,
    Holidays,
    Exams,
}

impl TeacherView {
    pub fn parse(raw: &str) -> Option<TeacherView> {
        match raw {
            "teacher-dashboard" => Some(TeacherView::Dashboard),
            "teacher-attendance" => Some(TeacherView::Attendance),
            "teacher-timetable" => Some(TeacherView::Timetable),
            "teacher-classes" => Some(TeacherView::Classes),
            "teacher-grades" => Some(TeacherView::Grades),
            "teacher-homework" => Some(TeacherView::Homework),
            "teacher-syllabus" => Some(TeacherView::Syllabus),
            "teacher-lessons" => Some(TeacherView::Lessons),
            "teacher-messages" => Some(TeacherView::Messages),
            "teacher-activities" => Some(TeacherView::Activities),
            "teacher-holidays" => Some(TeacherView::Holidays),
            "teacher-exams" => Some(TeacherView::Exams),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TeacherView::Dashboard => "teacher-dashboard",
            TeacherView::Attendance => "teacher-attendance",
            TeacherView::Timetable => "teacher-timetable",
            TeacherView::Classes => "teacher-classes",
            TeacherView::Grades => "teacher-grades",
            TeacherView::Homework => "teacher-homework",
            TeacherView::Syllabus => "teacher-syllabus",
            TeacherView::Lessons => "teacher-lessons",
            TeacherView::Messages => "teacher-messages",
            TeacherView::Activities => "teacher-activities",
            TeacherView::Holidays => "teacher-holidays",
            TeacherView::Exams => "teacher-exams",
        }
    }
}

/// Views reachable from the student menu. `ParentDashboard` is the one
/// key that never appears in the menu itself: it is the parent landing
/// view, rendered inside the student family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentView {
    Dashboard,
    Attendance,
    Timetable,
    Schedule,
    Syllabus,
    Marks,
    Homework,
    Datesheet,
    Classmates,
    Teachers,
    Birthdays,
    Gallery,
    Fees,
    Holidays,
    Activities,
    ParentDashboard,
}

impl StudentView {
    pub fn parse(raw: &str) -> Option<StudentView> {
        match raw {
            "student-dashboard" => Some(StudentView::Dashboard),
            "student-attendance" => Some(StudentView::Attendance),
            "student-timetable" => Some(StudentView::Timetable),
            "student-schedule" => Some(StudentView::Schedule),
            "student-syllabus" => Some(StudentView::Syllabus),
            "student-marks" => Some(StudentView::Marks),
            "student-homework" => Some(StudentView::Homework),
            "student-datesheet" => Some(StudentView::Datesheet),
            "student-classmates" => Some(StudentView::Classmates),
            "student-teachers" => Some(StudentView::Teachers),
            "student-birthdays" => Some(StudentView::Birthdays),
            "student-gallery" => Some(StudentView::Gallery),
            "student-fees" => Some(StudentView::Fees),
            "student-holidays" => Some(StudentView::Holidays),
            "student-activities" => Some(StudentView::Activities),
            "parent-dashboard" => Some(StudentView::ParentDashboard),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StudentView::Dashboard => "student-dashboard",
            StudentView::Attendance => "student-attendance",
            StudentView::Timetable => "student-timetable",
            StudentView::Schedule => "student-schedule",
            StudentView::Syllabus => "student-syllabus",
            StudentView::Marks => "student-marks",
            StudentView::Homework => "student-homework",
            StudentView::Datesheet => "student-datesheet",
            StudentView::Classmates => "student-classmates",
            StudentView::Teachers => "student-teachers",
            StudentView::Birthdays => "student-birthdays",
            StudentView::Gallery => "student-gallery",
            StudentView::Fees => "student-fees",
            StudentView::Holidays => "student-holidays",
            StudentView::Activities => "student-activities",
            StudentView::ParentDashboard => "parent-dashboard",
        }
    }
}

/// A content view key, scoped to the menu family it belongs to. Parsing
/// is family-local, so a key from another family never resolves and the
/// invalid combinations are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKey {
    Admin(AdminView),
    Teacher(TeacherView),
    Student(StudentView),
}

impl ViewKey {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewKey::Admin(v) => v.as_str(),
            ViewKey::Teacher(v) => v.as_str(),
            ViewKey::Student(v) => v.as_str(),
        }
    }
}

impl Serialize for ViewKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuFamily {
    Admin,
    Teacher,
    Student,
}

impl MenuFamily {
    pub fn as_str(self) -> &'static str {
        match self {
            MenuFamily::Admin => "admin",
            MenuFamily::Teacher => "teacher",
            MenuFamily::Student => "student",
        }
    }

    pub fn parse_view(self, raw: &str) -> Option<ViewKey> {
        match self {
            MenuFamily::Admin => AdminView::parse(raw).map(ViewKey::Admin),
            MenuFamily::Teacher => TeacherView::parse(raw).map(ViewKey::Teacher),
            MenuFamily::Student => StudentView::parse(raw).map(ViewKey::Student),
        }
    }

    pub fn menu(self) -> &'static [MenuSection] {
        match self {
            MenuFamily::Admin => ADMIN_MENU,
            MenuFamily::Teacher => TEACHER_MENU,
            MenuFamily::Student => STUDENT_MENU,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub title: &'static str,
    pub view: ViewKey,
    pub icon: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSection {
    pub label: &'static str,
    pub items: &'static [MenuItem],
}

const fn item(title: &'static str, view: ViewKey, icon: &'static str) -> MenuItem {
    MenuItem { title, view, icon }
}

pub static ADMIN_MENU: &[MenuSection] = &[
    MenuSection {
        label: "Main",
        items: &[
            item("Dashboard", ViewKey::Admin(AdminView::Dashboard), "layout-dashboard"),
            item("Students", ViewKey::Admin(AdminView::Students), "users"),
            item("Staff", ViewKey::Admin(AdminView::Staff), "user-check"),
            item("Attendance", ViewKey::Admin(AdminView::Attendance), "clipboard-list"),
            item("Grades", ViewKey::Admin(AdminView::Grades), "graduation-cap"),
        ],
    },
    MenuSection {
        label: "Academic",
        items: &[
            item("Timetable", ViewKey::Admin(AdminView::Timetable), "calendar"),
            item("Exams", ViewKey::Admin(AdminView::Exams), "file-text"),
            item("Syllabus", ViewKey::Admin(AdminView::Syllabus), "book-open"),
            item("Certificates", ViewKey::Admin(AdminView::Certificates), "award"),
        ],
    },
    MenuSection {
        label: "Finance",
        items: &[
            item("Fee Management", ViewKey::Admin(AdminView::Fees), "dollar-sign"),
            item("Payments", ViewKey::Admin(AdminView::Payments), "credit-card"),
            item("Payroll", ViewKey::Admin(AdminView::Payroll), "calculator"),
            item("Accounts", ViewKey::Admin(AdminView::Accounts), "building"),
        ],
    },
    MenuSection {
        label: "Operations",
        items: &[
            item("Transport", ViewKey::Admin(AdminView::Transport), "bus"),
            item("Library", ViewKey::Admin(AdminView::Library), "book-open"),
            item("Enquiries", ViewKey::Admin(AdminView::Enquiries), "help-circle"),
            item("Admissions", ViewKey::Admin(AdminView::Admissions), "user-plus"),
        ],
    },
    MenuSection {
        label: "Reports",
        items: &[
            item("Analytics", ViewKey::Admin(AdminView::Analytics), "bar-chart-3"),
            item("Reports", ViewKey::Admin(AdminView::Reports), "file-text"),
            item("Settings", ViewKey::Admin(AdminView::Settings), "settings"),
        ],
    },
];

pub static TEACHER_MENU: &[MenuSection] = &[
    MenuSection {
        label: "Teaching",
        items: &[
            item("Dashboard", ViewKey::Teacher(TeacherView::Dashboard), "layout-dashboard"),
            item("Student Attendance", ViewKey::Teacher(TeacherView::Attendance), "clipboard-list"),
            item("Timetable", ViewKey::Teacher(TeacherView::Timetable), "clock"),
            item("My Classes", ViewKey::Teacher(TeacherView::Classes), "users"),
            item("Grades & Marks", ViewKey::Teacher(TeacherView::Grades), "graduation-cap"),
        ],
    },
    MenuSection {
        label: "Content",
        items: &[
            item("Homework", ViewKey::Teacher(TeacherView::Homework), "file-text"),
            item("Syllabus", ViewKey::Teacher(TeacherView::Syllabus), "book-open"),
            item("Lesson Plans", ViewKey::Teacher(TeacherView::Lessons), "book-open"),
            item("Messages", ViewKey::Teacher(TeacherView::Messages), "message-circle"),
        ],
    },
    MenuSection {
        label: "Calendar",
        items: &[
            item("Activity Calendar", ViewKey::Teacher(TeacherView::Activities), "calendar-days"),
            item("Holiday List", ViewKey::Teacher(TeacherView::Holidays), "calendar"),
            item("Exam Schedule", ViewKey::Teacher(TeacherView::Exams), "calendar"),
        ],
    },
];

pub static STUDENT_MENU: &[MenuSection] = &[
    MenuSection {
        label: "Academic",
        items: &[
            item("Dashboard", ViewKey::Student(StudentView::Dashboard), "layout-dashboard"),
            item("Attendance", ViewKey::Student(StudentView::Attendance), "clipboard-list"),
            item("Timetable", ViewKey::Student(StudentView::Timetable), "clock"),
            item("Course Schedule", ViewKey::Student(StudentView::Schedule), "calendar"),
            item("Syllabus", ViewKey::Student(StudentView::Syllabus), "book-open"),
            item("Exam Marks", ViewKey::Student(StudentView::Marks), "graduation-cap"),
            item("Homework", ViewKey::Student(StudentView::Homework), "file-text"),
            item("Date Sheet", ViewKey::Student(StudentView::Datesheet), "calendar-days"),
        ],
    },
    MenuSection {
        label: "Social",
        items: &[
            item("Classmates", ViewKey::Student(StudentView::Classmates), "users"),
            item("Teachers", ViewKey::Student(StudentView::Teachers), "user-check"),
            item("Birthdays", ViewKey::Student(StudentView::Birthdays), "gift"),
            item("Photo Gallery", ViewKey::Student(StudentView::Gallery), "camera"),
        ],
    },
    MenuSection {
        label: "Other",
        items: &[
            item("Fee Report", ViewKey::Student(StudentView::Fees), "dollar-sign"),
            item("Holiday List", ViewKey::Student(StudentView::Holidays), "calendar"),
            item("Activity Calendar", ViewKey::Student(StudentView::Activities), "calendar-days"),
        ],
    },
];

#[derive(Debug, Clone)]
pub struct SignedIn {
    pub role: Role,
    pub email: String,
    pub display_name: String,
    pub school: Option<School>,
}

#[derive(Debug, Clone)]
pub enum Session {
    Anonymous,
    Authenticated(SignedIn),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectViewError {
    NotSignedIn,
    UnknownView,
}

/// The whole shell is one session and one active view; panel working
/// state (an open attendance sheet) rides along and is discarded when
/// the view changes, mirroring a screen remount.
#[derive(Debug)]
pub struct ShellState {
    pub session: Session,
    pub active_view: ViewKey,
    pub sheet: Option<AttendanceSheet>,
}

impl ShellState {
    pub fn new() -> ShellState {
        ShellState {
            session: Session::Anonymous,
            active_view: ViewKey::Admin(AdminView::Dashboard),
            sheet: None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        match &self.session {
            Session::Anonymous => None,
            Session::Authenticated(user) => Some(user.role),
        }
    }

    pub fn signed_in(&self) -> Option<&SignedIn> {
        match &self.session {
            Session::Anonymous => None,
            Session::Authenticated(user) => Some(user),
        }
    }

    /// Signing out always shows the admin menu over the login screen.
    pub fn menu_family(&self) -> MenuFamily {
        match self.role() {
            Some(role) => role.family(),
            None => MenuFamily::Admin,
        }
    }

    /// Credential checks happen at the IPC boundary; by the time a
    /// `SignedIn` reaches here it is accepted unconditionally. Replaces
    /// any previous session and lands on the role's default view.
    pub fn login(&mut self, user: SignedIn) -> ViewKey {
        let view = user.role.default_view();
        self.session = Session::Authenticated(user);
        self.active_view = view;
        self.sheet = None;
        view
    }

    /// Idempotent: logging out of an anonymous shell is a no-op with the
    /// same resulting state.
    pub fn logout(&mut self) {
        self.session = Session::Anonymous;
        self.active_view = ViewKey::Admin(AdminView::Dashboard);
        self.sheet = None;
    }

    /// Strict selection: a key outside the current role's family is
    /// rejected and the active view is left untouched. Re-selecting the
    /// already-active view keeps panel state (no remount happens).
    pub fn select_view(&mut self, raw: &str) -> Result<ViewKey, SelectViewError> {
        let role = self.role().ok_or(SelectViewError::NotSignedIn)?;
        let view = role
            .family()
            .parse_view(raw)
            .ok_or(SelectViewError::UnknownView)?;
        if view != self.active_view {
            self.sheet = None;
        }
        self.active_view = view;
        Ok(view)
    }
}

/// Render-time lookup stays total: anything the role's family does not
/// recognize falls back to the role's landing view instead of erroring.
pub fn resolve_content(role: Role, raw: &str) -> ViewKey {
    role.family()
        .parse_view(raw)
        .unwrap_or_else(|| role.default_view())
}
