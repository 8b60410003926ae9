//! 预导入模块，方便使用

pub use super::materials::{
    ActiveModel as MaterialActiveModel, Entity as Materials, Model as MaterialModel,
};
pub use super::modules::{ActiveModel as ModuleActiveModel, Entity as Modules, Model as ModuleModel};
pub use super::progress::{
    ActiveModel as ProgressActiveModel, Entity as Progress, Model as ProgressModel,
};
pub use super::topics::{ActiveModel as TopicActiveModel, Entity as Topics, Model as TopicModel};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
