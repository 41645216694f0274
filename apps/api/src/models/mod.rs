pub mod resume;

pub use resume::{
    format_month, Certification, Competencies, EducationEntry, ExperienceEntry, Language, Link,
    PersonalInfo, ProjectEntry, ResumeData,
};
