//! Thin data-access wrappers, one method per REST endpoint.

mod authz;
mod badge;
mod core;
mod door;
mod label;
mod tool;

pub use authz::{AuthzApi, LoginForm};
pub use badge::{BadgeApi, CreateBadgeForm};
pub use core::{
    AddCircleMemberForm, CheckoutSessionForm, CompanyForm, CoreApi, CreateCircleForm,
    CustomerPortalForm, EditProfileForm, EmployeeForm, RegisterAccountForm,
    RemoveCircleMemberForm, ResetPasswordForm, SetPasswordForm,
};
pub use door::{DoorApi, OpenDoorsForm};
pub use label::{BoxLabelForm, LabelApi};
pub use tool::{ToolApi, ToolDetailsForm, ToolForm};
