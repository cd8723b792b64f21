use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::model::{
    AcademicPerformance, AccountRole, ActivityItem, AttendanceTrends, DashboardModel, FeeRecord,
    FeeStatus, FeeStructureRow, GradeAverages, GradeEntry, GradeHighlights, GradeStudent,
    MarkStatus, Profile, RosterStudent, School, StaffRow, StaffStatus, StatCard, StudentRow,
    StudentStatus, SummaryCard, TestType,
};

pub const CLASSES: [&str; 10] = [
    "Class 1", "Class 2", "Class 3", "Class 4", "Class 5", "Class 6", "Class 7", "Class 8",
    "Class 9", "Class 10",
];

pub const SUBJECTS: [&str; 8] = [
    "Mathematics", "Science", "English", "History", "Geography", "Physics", "Chemistry", "Biology",
];

pub const DEPARTMENTS: [&str; 9] = [
    "Mathematics", "Science", "English", "Social Studies", "Hindi", "Computer Science",
    "Physical Education", "Arts", "Administration",
];

/// Everything the daemon serves. Loaded once at startup, either from the
/// built-in sample set or from a `--seed` JSON file, and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    pub school_name: String,
    pub notification_count: i64,
    pub schools: Vec<School>,
    pub profiles: Vec<Profile>,
    pub students: Vec<StudentRow>,
    pub class_roster: Vec<RosterStudent>,
    pub staff: Vec<StaffRow>,
    pub staff_overview: Vec<SummaryCard>,
    pub staff_payroll: Vec<SummaryCard>,
    pub staff_attendance: Vec<SummaryCard>,
    pub fee_structure: Vec<FeeStructureRow>,
    pub fee_records: Vec<FeeRecord>,
    pub fee_summary: Vec<SummaryCard>,
    pub grade_students: Vec<GradeStudent>,
    pub grade_entries: Vec<GradeEntry>,
    pub grade_highlights: GradeHighlights,
    pub dashboard: DashboardModel,
}

impl SeedData {
    pub fn find_school(&self, id: &str) -> Option<&School> {
        self.schools.iter().find(|s| s.id == id)
    }

    /// Profile lookup for display names. A profile pinned to a school
    /// only matches sign-ins that picked that school; unpinned profiles
    /// match any sign-in.
    pub fn find_profile(&self, email: &str, school_id: Option<&str>) -> Option<&Profile> {
        self.profiles.iter().find(|p| {
            p.email.eq_ignore_ascii_case(email)
                && match (p.school_id.as_deref(), school_id) {
                    (Some(own), Some(selected)) => own == selected,
                    (Some(_), None) => false,
                    (None, _) => true,
                }
        })
    }
}

pub fn load(path: &Path) -> anyhow::Result<SeedData> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read seed file {}", path.display()))?;
    let data: SeedData = serde_json::from_str(&text)
        .with_context(|| format!("parse seed file {}", path.display()))?;
    Ok(data)
}

fn card(title: &str, value: &str, description: &str) -> SummaryCard {
    SummaryCard {
        title: title.into(),
        value: value.into(),
        description: description.into(),
    }
}

pub fn builtin() -> SeedData {
    let schools = vec![
        School { id: "school1".into(), name: "Delhi Public School".into() },
        School { id: "school2".into(), name: "St. Mary's High School".into() },
        School { id: "school3".into(), name: "Modern Public School".into() },
    ];

    let profiles = vec![
        Profile {
            email: "admin@school.edu".into(),
            name: "John Doe".into(),
            role: AccountRole::SchoolAdmin,
            school_id: None,
        },
        Profile {
            email: "alice.johnson@school.edu".into(),
            name: "Alice Johnson".into(),
            role: AccountRole::Student,
            school_id: Some("school1".into()),
        },
        Profile {
            email: "michael.chen@school.edu".into(),
            name: "Michael Chen".into(),
            role: AccountRole::Student,
            school_id: Some("school2".into()),
        },
        Profile {
            email: "robert.johnson@school.edu".into(),
            name: "Robert Johnson".into(),
            role: AccountRole::Parent,
            school_id: Some("school1".into()),
        },
        Profile {
            email: "sarah.johnson@school.com".into(),
            name: "Dr. Sarah Johnson".into(),
            role: AccountRole::Teacher,
            school_id: Some("school1".into()),
        },
        Profile {
            email: "amit.patel@school.com".into(),
            name: "Mr. Amit Patel".into(),
            role: AccountRole::Staff,
            school_id: Some("school1".into()),
        },
    ];

    let students = [
        ("1", "Alice Johnson", "Class 10", "10-001", "Robert Johnson", "+91-9876543210",
            "alice.johnson@school.edu", 96.5),
        ("2", "Michael Chen", "Class 9", "9-015", "Wei Chen", "+91-9876543211",
            "michael.chen@school.edu", 89.2),
        ("3", "Sarah Williams", "Class 8", "8-008", "David Williams", "+91-9876543212",
            "sarah.williams@school.edu", 98.1),
        ("4", "David Brown", "Class 7", "7-022", "Lisa Brown", "+91-9876543213",
            "david.brown@school.edu", 92.7),
        ("5", "Emma Davis", "Class 6", "6-012", "Mark Davis", "+91-9876543214",
            "emma.davis@school.edu", 94.3),
        ("6", "James Wilson", "Class 5", "5-045", "Susan Wilson", "+91-9876543215",
            "james.wilson@school.edu", 91.8),
    ]
    .into_iter()
    .map(|(id, name, class, roll, parent, phone, email, attendance)| StudentRow {
        id: id.into(),
        name: name.into(),
        class: class.into(),
        roll_number: roll.into(),
        parent_name: parent.into(),
        parent_phone: phone.into(),
        email: email.into(),
        attendance,
        status: StudentStatus::Active,
    })
    .collect();

    let class_roster = [
        ("1", "Alice Johnson", "10-001", "+91-9876543210"),
        ("2", "Michael Chen", "10-002", "+91-9876543211"),
        ("3", "Sarah Williams", "10-003", "+91-9876543212"),
        ("4", "David Brown", "10-004", "+91-9876543213"),
        ("5", "Emma Davis", "10-005", "+91-9876543214"),
        ("6", "James Wilson", "10-006", "+91-9876543215"),
        ("7", "Priya Sharma", "10-007", "+91-9876543216"),
        ("8", "Rahul Patel", "10-008", "+91-9876543217"),
    ]
    .into_iter()
    .map(|(id, name, roll, phone)| RosterStudent {
        id: id.into(),
        name: name.into(),
        roll_number: roll.into(),
        parent_phone: phone.into(),
    })
    .collect();

    let staff = vec![
        StaffRow {
            id: 1,
            name: "Dr. Sarah Johnson".into(),
            employee_id: "EMP001".into(),
            department: "Mathematics".into(),
            designation: "Head Teacher".into(),
            qualification: "M.Sc, B.Ed".into(),
            experience: "15 years".into(),
            phone: "+91-9876543210".into(),
            email: "sarah.johnson@school.com".into(),
            joining_date: "2010-06-15".into(),
            salary: 85000,
            status: StaffStatus::Active,
            address: "123 Main Street, Delhi".into(),
        },
        StaffRow {
            id: 2,
            name: "Mr. Rajesh Kumar".into(),
            employee_id: "EMP002".into(),
            department: "Science".into(),
            designation: "Senior Teacher".into(),
            qualification: "M.Sc Physics, B.Ed".into(),
            experience: "12 years".into(),
            phone: "+91-9876543211".into(),
            email: "rajesh.kumar@school.com".into(),
            joining_date: "2012-08-20".into(),
            salary: 75000,
            status: StaffStatus::Active,
            address: "456 Park Avenue, Delhi".into(),
        },
        StaffRow {
            id: 3,
            name: "Ms. Priya Sharma".into(),
            employee_id: "EMP003".into(),
            department: "English".into(),
            designation: "Teacher".into(),
            qualification: "M.A English, B.Ed".into(),
            experience: "8 years".into(),
            phone: "+91-9876543212".into(),
            email: "priya.sharma@school.com".into(),
            joining_date: "2016-04-10".into(),
            salary: 65000,
            status: StaffStatus::Active,
            address: "789 Garden Road, Delhi".into(),
        },
        StaffRow {
            id: 4,
            name: "Mr. Amit Patel".into(),
            employee_id: "EMP004".into(),
            department: "Administration".into(),
            designation: "Office Manager".into(),
            qualification: "MBA".into(),
            experience: "10 years".into(),
            phone: "+91-9876543213".into(),
            email: "amit.patel@school.com".into(),
            joining_date: "2014-01-15".into(),
            salary: 55000,
            status: StaffStatus::Active,
            address: "321 Business Center, Delhi".into(),
        },
    ];

    let staff_overview = vec![
        card("Total Staff", "48", "Active members"),
        card("Teachers", "35", "Teaching staff"),
        card("Admin Staff", "13", "Non-teaching staff"),
        card("On Leave", "3", "Currently on leave"),
    ];

    let staff_payroll = vec![
        card("Total Payroll", "₹32,50,000", "This month"),
        card("Average Salary", "₹67,708", "Per employee"),
        card("Pending Payments", "₹0", "All cleared"),
    ];

    let staff_attendance = vec![
        card("Present Today", "45", "Out of 48 staff"),
        card("On Leave", "3", "Approved leave"),
        card("Attendance Rate", "93.8%", "This month"),
    ];

    let fee_structure = [
        ("1", 5000, 1500, 300, 200, 500),
        ("2", 5500, 1500, 300, 200, 500),
        ("3", 6000, 1500, 300, 300, 600),
        ("4", 6500, 1500, 300, 300, 600),
        ("5", 7000, 1500, 400, 400, 700),
    ]
    .into_iter()
    .map(|(class, tuition, transport, library, lab, activity)| FeeStructureRow {
        class: class.into(),
        tuition,
        transport,
        library,
        lab,
        activity,
    })
    .collect();

    let fee_records = vec![
        FeeRecord {
            id: 1,
            student_name: "Rahul Sharma".into(),
            class: "5".into(),
            roll_no: "05001".into(),
            month: "January 2025".into(),
            amount: 9500,
            paid: 9500,
            due: 0,
            status: FeeStatus::Paid,
            due_date: "2025-01-10".into(),
            payment_date: Some("2025-01-08".into()),
        },
        FeeRecord {
            id: 2,
            student_name: "Priya Patel".into(),
            class: "4".into(),
            roll_no: "04015".into(),
            month: "January 2025".into(),
            amount: 8700,
            paid: 5000,
            due: 3700,
            status: FeeStatus::Partial,
            due_date: "2025-01-10".into(),
            payment_date: None,
        },
        FeeRecord {
            id: 3,
            student_name: "Amit Kumar".into(),
            class: "3".into(),
            roll_no: "03022".into(),
            month: "January 2025".into(),
            amount: 8200,
            paid: 0,
            due: 8200,
            status: FeeStatus::Pending,
            due_date: "2025-01-10".into(),
            payment_date: None,
        },
    ];

    let fee_summary = vec![
        card("Total Collection", "₹2,45,000", "This month"),
        card("Pending Fees", "₹1,85,000", "Total outstanding"),
        card("Students Paid", "345", "Out of 500 students"),
        card("Collection Rate", "69%", "This month"),
    ];

    let grade_students = [
        ("1", "Alice Johnson", "10A-001", 85.2, 87.1, 88.5, 86.9),
        ("2", "Michael Chen", "10A-002", 78.9, 82.3, 85.1, 82.1),
        ("3", "Sarah Williams", "10A-003", 92.4, 90.8, 91.2, 91.5),
        ("4", "David Brown", "10A-004", 81.6, 79.4, 83.7, 81.9),
    ]
    .into_iter()
    .map(|(id, name, roll, weekly, monthly, quarterly, overall)| GradeStudent {
        id: id.into(),
        name: name.into(),
        roll_number: roll.into(),
        class: "Grade 10-A".into(),
        averages: GradeAverages { weekly, monthly, quarterly, overall },
    })
    .collect();

    let grade_entries = vec![
        GradeEntry {
            id: "1".into(),
            student_id: "1".into(),
            student_name: "Alice Johnson".into(),
            roll_number: "10A-001".into(),
            subject: "Mathematics".into(),
            test_type: TestType::Weekly,
            marks: 85.0,
            total_marks: 100.0,
            percentage: 85.0,
            date: "2024-01-15".into(),
        },
        GradeEntry {
            id: "2".into(),
            student_id: "2".into(),
            student_name: "Michael Chen".into(),
            roll_number: "10A-002".into(),
            subject: "Mathematics".into(),
            test_type: TestType::Weekly,
            marks: 78.0,
            total_marks: 100.0,
            percentage: 78.0,
            date: "2024-01-15".into(),
        },
    ];

    let grade_highlights = GradeHighlights {
        school_average: 84.2,
        improving: 67,
        at_risk: 12,
        high_performers: 21,
    };

    let dashboard = DashboardModel {
        stats: vec![
            StatCard {
                title: "Total Students".into(),
                value: "1,247".into(),
                description: "Active enrollments".into(),
                icon: "users".into(),
                trend: "+12 this month".into(),
                color: "primary".into(),
            },
            StatCard {
                title: "Present Today".into(),
                value: "1,189".into(),
                description: "95.3% attendance".into(),
                icon: "user-check".into(),
                trend: "+2.1% from yesterday".into(),
                color: "success".into(),
            },
            StatCard {
                title: "Absent Today".into(),
                value: "58".into(),
                description: "4.7% absent rate".into(),
                icon: "user-x".into(),
                trend: "-1.2% from yesterday".into(),
                color: "warning".into(),
            },
            StatCard {
                title: "Pending Notifications".into(),
                value: "24".into(),
                description: "Parent alerts to send".into(),
                icon: "bell".into(),
                trend: "15 sent today".into(),
                color: "accent".into(),
            },
        ],
        recent_activity: vec![
            ActivityItem {
                student: "Alice Johnson".into(),
                class: "Grade 10-A".into(),
                status: MarkStatus::Absent,
                time: "2 hours ago".into(),
            },
            ActivityItem {
                student: "Michael Chen".into(),
                class: "Grade 9-B".into(),
                status: MarkStatus::Late,
                time: "3 hours ago".into(),
            },
            ActivityItem {
                student: "Sarah Williams".into(),
                class: "Grade 11-C".into(),
                status: MarkStatus::Present,
                time: "4 hours ago".into(),
            },
            ActivityItem {
                student: "David Brown".into(),
                class: "Grade 10-B".into(),
                status: MarkStatus::Absent,
                time: "5 hours ago".into(),
            },
        ],
        attendance_trends: AttendanceTrends {
            this_week: 96.2,
            last_week: 94.8,
            monthly_average: 95.1,
            yearly_average: 94.7,
        },
        academic_performance: AcademicPerformance {
            weekly_tests: 78.5,
            monthly_assessments: 82.1,
            quarterly_exams: 85.3,
            overall_average: 81.9,
        },
    };

    SeedData {
        school_name: "Delhi Public School".into(),
        notification_count: 3,
        schools,
        profiles,
        students,
        class_roster,
        staff,
        staff_overview,
        staff_payroll,
        staff_attendance,
        fee_structure,
        fee_records,
        fee_summary,
        grade_students,
        grade_entries,
        grade_highlights,
        dashboard,
    }
}
