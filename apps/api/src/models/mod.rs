pub mod collection;
pub mod cv;
pub mod entities;
pub mod section;

pub use cv::{
    initial_cv_data, CvData, Design, DesignPatch, PersonalInfo, PersonalInfoPatch, TemplateId,
};
pub use entities::{Entity, Patch};
pub use section::{SectionKey, SectionMeta, SectionPatch};
