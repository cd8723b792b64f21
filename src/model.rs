use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shell::Role;

/// Account roles as the backend `user_role` enum spells them. `Staff`
/// exists in the directory but has no shell menu family of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    SchoolAdmin,
    Teacher,
    Student,
    Parent,
    Staff,
}

impl AccountRole {
    pub fn shell_role(self) -> Option<Role> {
        match self {
            AccountRole::SchoolAdmin => Some(Role::SchoolAdmin),
            AccountRole::Teacher => Some(Role::Teacher),
            AccountRole::Student => Some(Role::Student),
            AccountRole::Parent => Some(Role::Parent),
            AccountRole::Staff => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    pub id: String,
    pub name: String,
}

/// Directory profile used only to pick a display name at sign-in. The
/// session role always comes from the request, never from here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub email: String,
    pub name: String,
    pub role: AccountRole,
    pub school_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRow {
    pub id: String,
    pub name: String,
    pub class: String,
    pub roll_number: String,
    pub parent_name: String,
    pub parent_phone: String,
    pub email: String,
    pub attendance: f64,
    pub status: StudentStatus,
}

/// One row of the class roster used for marking attendance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterStudent {
    pub id: String,
    pub name: String,
    pub roll_number: String,
    pub parent_phone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkStatus {
    Present,
    Absent,
    Late,
}

impl MarkStatus {
    pub fn parse(raw: &str) -> Option<MarkStatus> {
        match raw {
            "present" => Some(MarkStatus::Present),
            "absent" => Some(MarkStatus::Absent),
            "late" => Some(MarkStatus::Late),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MarkStatus::Present => "present",
            MarkStatus::Absent => "absent",
            MarkStatus::Late => "late",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceTally {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub unmarked: usize,
}

/// An in-progress marking sheet for one class and date. Students start
/// unmarked; the sheet lives only as long as the attendance screen stays
/// open and is never persisted.
#[derive(Debug, Clone)]
pub struct AttendanceSheet {
    pub class: String,
    pub date: NaiveDate,
    pub roster: Vec<RosterStudent>,
    marks: BTreeMap<String, MarkStatus>,
}

impl AttendanceSheet {
    pub fn open(class: String, date: NaiveDate, roster: Vec<RosterStudent>) -> AttendanceSheet {
        AttendanceSheet {
            class,
            date,
            roster,
            marks: BTreeMap::new(),
        }
    }

    /// Returns false when the student is not on the roster.
    pub fn mark(&mut self, student_id: &str, status: MarkStatus) -> bool {
        if !self.roster.iter().any(|s| s.id == student_id) {
            return false;
        }
        self.marks.insert(student_id.to_string(), status);
        true
    }

    pub fn status_of(&self, student_id: &str) -> Option<MarkStatus> {
        self.marks.get(student_id).copied()
    }

    pub fn tally(&self) -> AttendanceTally {
        let mut tally = AttendanceTally {
            total: self.roster.len(),
            present: 0,
            absent: 0,
            late: 0,
            unmarked: 0,
        };
        for student in &self.roster {
            match self.marks.get(&student.id) {
                Some(MarkStatus::Present) => tally.present += 1,
                Some(MarkStatus::Absent) => tally.absent += 1,
                Some(MarkStatus::Late) => tally.late += 1,
                None => tally.unmarked += 1,
            }
        }
        tally
    }

    pub fn absentees(&self) -> Vec<&RosterStudent> {
        self.roster
            .iter()
            .filter(|s| self.marks.get(&s.id) == Some(&MarkStatus::Absent))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffStatus {
    Active,
    Inactive,
    OnLeave,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffRow {
    pub id: i64,
    pub name: String,
    pub employee_id: String,
    pub department: String,
    pub designation: String,
    pub qualification: String,
    pub experience: String,
    pub phone: String,
    pub email: String,
    pub joining_date: String,
    pub salary: i64,
    pub status: StaffStatus,
    pub address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeStatus {
    Paid,
    Partial,
    Pending,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeStructureRow {
    pub class: String,
    pub tuition: i64,
    pub transport: i64,
    pub library: i64,
    pub lab: i64,
    pub activity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeRecord {
    pub id: i64,
    pub student_name: String,
    pub class: String,
    pub roll_no: String,
    pub month: String,
    pub amount: i64,
    pub paid: i64,
    pub due: i64,
    pub status: FeeStatus,
    pub due_date: String,
    pub payment_date: Option<String>,
}

/// Generic dashboard-style summary card (fees and staff panels).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCard {
    pub title: String,
    pub value: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    Weekly,
    Assessment,
    Quarterly,
    Halfyearly,
    Annual,
}

impl TestType {
    pub const ALL: [TestType; 5] = [
        TestType::Weekly,
        TestType::Assessment,
        TestType::Quarterly,
        TestType::Halfyearly,
        TestType::Annual,
    ];

    pub fn parse(raw: &str) -> Option<TestType> {
        match raw {
            "weekly" => Some(TestType::Weekly),
            "assessment" => Some(TestType::Assessment),
            "quarterly" => Some(TestType::Quarterly),
            "halfyearly" => Some(TestType::Halfyearly),
            "annual" => Some(TestType::Annual),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TestType::Weekly => "weekly",
            TestType::Assessment => "assessment",
            TestType::Quarterly => "quarterly",
            TestType::Halfyearly => "halfyearly",
            TestType::Annual => "annual",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TestType::Weekly => "Weekly Test",
            TestType::Assessment => "Monthly Assessment",
            TestType::Quarterly => "Quarterly Exam",
            TestType::Halfyearly => "Half Yearly Exam",
            TestType::Annual => "Annual Exam",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeAverages {
    pub weekly: f64,
    pub monthly: f64,
    pub quarterly: f64,
    pub overall: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeStudent {
    pub id: String,
    pub name: String,
    pub roll_number: String,
    pub class: String,
    pub averages: GradeAverages,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeEntry {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub roll_number: String,
    pub subject: String,
    pub test_type: TestType,
    pub marks: f64,
    pub total_marks: f64,
    pub percentage: f64,
    pub date: String,
}

/// Static analytics shown alongside the computed class averages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeHighlights {
    pub school_average: f64,
    pub improving: i64,
    pub at_risk: i64,
    pub high_performers: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub description: String,
    pub icon: String,
    pub trend: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    pub student: String,
    pub class: String,
    pub status: MarkStatus,
    pub time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceTrends {
    pub this_week: f64,
    pub last_week: f64,
    pub monthly_average: f64,
    pub yearly_average: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicPerformance {
    pub weekly_tests: f64,
    pub monthly_assessments: f64,
    pub quarterly_exams: f64,
    pub overall_average: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardModel {
    pub stats: Vec<StatCard>,
    pub recent_activity: Vec<ActivityItem>,
    pub attendance_trends: AttendanceTrends,
    pub academic_performance: AcademicPerformance,
}

/// 1-decimal rounding used wherever the shell shows a percentage.
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Mean percentage for one test type, rounded to 1 decimal. Empty input
/// averages to 0 rather than NaN.
pub fn class_average(entries: &[GradeEntry], test_type: TestType) -> f64 {
    let relevant: Vec<&GradeEntry> = entries.iter().filter(|e| e.test_type == test_type).collect();
    if relevant.is_empty() {
        return 0.0;
    }
    let sum: f64 = relevant.iter().map(|e| e.percentage).sum();
    round1(sum / relevant.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<RosterStudent> {
        [
            ("1", "Alice Johnson", "10-001", "+91-9876543210"),
            ("2", "Michael Chen", "10-002", "+91-9876543211"),
            ("3", "Sarah Williams", "10-003", "+91-9876543212"),
        ]
        .into_iter()
        .map(|(id, name, roll, phone)| RosterStudent {
            id: id.to_string(),
            name: name.to_string(),
            roll_number: roll.to_string(),
            parent_phone: phone.to_string(),
        })
        .collect()
    }

    fn sheet() -> AttendanceSheet {
        AttendanceSheet::open(
            "Class 10".to_string(),
            chrono::NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            roster(),
        )
    }

    fn entry(test_type: TestType, percentage: f64) -> GradeEntry {
        GradeEntry {
            id: "1".to_string(),
            student_id: "1".to_string(),
            student_name: "Alice Johnson".to_string(),
            roll_number: "10A-001".to_string(),
            subject: "Mathematics".to_string(),
            test_type,
            marks: percentage,
            total_marks: 100.0,
            percentage,
            date: "2024-01-15".to_string(),
        }
    }

    #[test]
    fn sheet_starts_unmarked_and_tallies_statuses() {
        let mut s = sheet();
        assert_eq!(s.tally().unmarked, 3);

        assert!(s.mark("1", MarkStatus::Present));
        assert!(s.mark("2", MarkStatus::Absent));
        let t = s.tally();
        assert_eq!((t.present, t.absent, t.late, t.unmarked), (1, 1, 0, 1));
        assert_eq!(t.total, 3);

        // Re-marking replaces the previous status.
        assert!(s.mark("2", MarkStatus::Late));
        let t = s.tally();
        assert_eq!((t.present, t.absent, t.late, t.unmarked), (1, 0, 1, 1));
    }

    #[test]
    fn marking_unknown_student_is_rejected() {
        let mut s = sheet();
        assert!(!s.mark("99", MarkStatus::Present));
        assert_eq!(s.tally().unmarked, 3);
    }

    #[test]
    fn absentees_lists_only_absent_students() {
        let mut s = sheet();
        s.mark("1", MarkStatus::Absent);
        s.mark("2", MarkStatus::Late);
        let names: Vec<&str> = s.absentees().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Alice Johnson"]);
    }

    #[test]
    fn class_average_is_mean_percentage_to_one_decimal() {
        let entries = vec![
            entry(TestType::Weekly, 85.0),
            entry(TestType::Weekly, 78.0),
            entry(TestType::Quarterly, 91.0),
        ];
        assert_eq!(class_average(&entries, TestType::Weekly), 81.5);
        assert_eq!(class_average(&entries, TestType::Quarterly), 91.0);
        assert_eq!(class_average(&entries, TestType::Annual), 0.0);
    }

    #[test]
    fn test_type_strings_and_labels() {
        for t in TestType::ALL {
            assert_eq!(TestType::parse(t.as_str()), Some(t));
        }
        assert_eq!(TestType::Assessment.label(), "Monthly Assessment");
        assert_eq!(TestType::parse("midterm"), None);
    }

    #[test]
    fn staff_account_has_no_shell_role() {
        assert_eq!(AccountRole::Staff.shell_role(), None);
        assert_eq!(
            AccountRole::SchoolAdmin.shell_role(),
            Some(crate::shell::Role::SchoolAdmin)
        );
    }
}
