//! Accounts, circles, companies, and membership billing endpoints.

use serde::Serialize;
use serde_json::Value;

use crate::error::ClientError;
use crate::transport::HttpTransport;

/// Payload for registering a new account.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterAccountForm {
    /// Desired username.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Full name.
    pub name: String,
    /// Initial password.
    pub password: String,
    /// Optional phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Payload for starting a password reset.
#[derive(Debug, Clone, Serialize)]
pub struct ResetPasswordForm {
    /// Username or email to reset.
    pub username: String,
}

/// Payload for changing the password of the logged-in account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPasswordForm {
    /// Current password.
    pub old_password: String,
    /// Replacement password.
    pub new_password: String,
}

/// Payload for editing the logged-in profile.
#[derive(Debug, Clone, Serialize)]
pub struct EditProfileForm {
    /// Phone number, cleared when `None`.
    pub phone: Option<String>,
}

/// Payload for creating a circle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCircleForm {
    /// Circle name.
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether memberships in this circle require a comment.
    pub comment_required_for_membership: bool,
    /// Comment for the initial admin membership, when required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Payload for adding an account to a circle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCircleMemberForm {
    /// Username of the account to add.
    pub account_username: String,
    /// Target circle id.
    pub circle_id: i64,
    /// Membership comment; required by some circles.
    pub comment: String,
}

/// Payload for removing an account from a circle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveCircleMemberForm {
    /// Circle to remove the account from.
    pub circle_id: i64,
}

/// Payload for creating or updating a company.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyForm {
    /// Company id; absent when creating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Company name.
    pub name: String,
    /// Account id of the company contact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<i64>,
    /// Whether the company's employees count as paying members.
    pub active: bool,
}

/// Payload for adding or removing a company employee.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeForm {
    /// Employee account id.
    pub account_id: i64,
}

/// Payload for starting a hosted billing checkout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionForm {
    /// Origin to return to after checkout.
    pub base_url: String,
    /// Selected membership tier's price id.
    pub price_id: String,
}

/// Payload for opening the billing provider's customer portal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPortalForm {
    /// Origin to return to after managing billing.
    pub base_url: String,
}

/// Accounts, circles, companies, profile self-service, and membership
/// billing.
#[derive(Debug, Clone)]
pub struct CoreApi {
    transport: HttpTransport,
}

impl CoreApi {
    /// Create the core wrapper.
    #[must_use]
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// `POST /service/register-account`
    pub async fn register_account(
        &self,
        form: &RegisterAccountForm,
    ) -> Result<Option<Value>, ClientError> {
        self.transport.post("/service/register-account", form).await
    }

    /// `POST /service/start-reset-password`
    pub async fn start_reset_password(
        &self,
        form: &ResetPasswordForm,
    ) -> Result<Option<Value>, ClientError> {
        self.transport.post("/service/start-reset-password", form).await
    }

    /// `POST /service/set-password`
    pub async fn set_password(&self, form: &SetPasswordForm) -> Result<Option<Value>, ClientError> {
        self.transport.post("/service/set-password", form).await
    }

    /// `POST /service/edit-profile`
    pub async fn edit_profile(&self, form: &EditProfileForm) -> Result<Option<Value>, ClientError> {
        self.transport.post("/service/edit-profile", form).await
    }

    /// `GET /data/account`
    pub async fn account_list(&self) -> Result<Option<Value>, ClientError> {
        self.transport.get("/data/account").await
    }

    /// `GET /data/account/{id}`
    pub async fn account(&self, account_id: i64) -> Result<Option<Value>, ClientError> {
        self.transport.get(&format!("/data/account/{account_id}")).await
    }

    /// `GET /data/account-summary/{id}`
    pub async fn account_summary(&self, account_id: i64) -> Result<Option<Value>, ClientError> {
        self.transport.get(&format!("/data/account-summary/{account_id}")).await
    }

    /// `POST /service/circle/create-membership`
    pub async fn add_account_to_circle(
        &self,
        form: &AddCircleMemberForm,
    ) -> Result<Option<Value>, ClientError> {
        self.transport.post("/service/circle/create-membership", form).await
    }

    /// `POST /data/account/{id}/cmd/remove-membership`
    pub async fn remove_account_from_circle(
        &self,
        account_id: i64,
        form: &RemoveCircleMemberForm,
    ) -> Result<Option<Value>, ClientError> {
        self.transport
            .post(&format!("/data/account/{account_id}/cmd/remove-membership"), form)
            .await
    }

    /// `GET /data/circle`
    pub async fn circle_list(&self) -> Result<Option<Value>, ClientError> {
        self.transport.get("/data/circle").await
    }

    /// `GET /data/circle/{id}`
    pub async fn circle(&self, circle_id: i64) -> Result<Option<Value>, ClientError> {
        self.transport.get(&format!("/data/circle/{circle_id}")).await
    }

    /// `POST /data/circle`
    pub async fn create_circle(
        &self,
        form: &CreateCircleForm,
    ) -> Result<Option<Value>, ClientError> {
        self.transport.post("/data/circle", form).await
    }

    /// `DELETE /data/circle/{id}`
    pub async fn remove_circle(&self, circle_id: i64) -> Result<Option<Value>, ClientError> {
        self.transport
            .delete::<Value>(&format!("/data/circle/{circle_id}"), None)
            .await
    }

    /// `GET /data/company`
    pub async fn company_list(&self) -> Result<Option<Value>, ClientError> {
        self.transport.get("/data/company").await
    }

    /// `GET /data/company/{id}`
    pub async fn company(&self, company_id: i64) -> Result<Option<Value>, ClientError> {
        self.transport.get(&format!("/data/company/{company_id}")).await
    }

    /// `POST /data/company`
    pub async fn add_company(&self, form: &CompanyForm) -> Result<Option<Value>, ClientError> {
        self.transport.post("/data/company", form).await
    }

    /// `PUT /data/company`
    pub async fn update_company(&self, form: &CompanyForm) -> Result<Option<Value>, ClientError> {
        self.transport.put("/data/company", form).await
    }

    /// `POST /data/company/{id}/cmd/add-employee`
    pub async fn company_add_employee(
        &self,
        company_id: i64,
        form: &EmployeeForm,
    ) -> Result<Option<Value>, ClientError> {
        self.transport
            .post(&format!("/data/company/{company_id}/cmd/add-employee"), form)
            .await
    }

    /// `POST /data/company/{id}/cmd/remove-employee`
    pub async fn company_remove_employee(
        &self,
        company_id: i64,
        form: &EmployeeForm,
    ) -> Result<Option<Value>, ClientError> {
        self.transport
            .post(&format!("/data/company/{company_id}/cmd/remove-employee"), form)
            .await
    }

    /// `GET /data/recent-events`
    pub async fn recent_events(&self) -> Result<Option<Value>, ClientError> {
        self.transport.get("/data/recent-events").await
    }

    /// `GET /membership/details`
    pub async fn membership_details(&self) -> Result<Option<Value>, ClientError> {
        self.transport.get("/membership/details").await
    }

    /// `GET /membership/tiers`
    pub async fn membership_tiers(&self) -> Result<Option<Value>, ClientError> {
        self.transport.get("/membership/tiers").await
    }

    /// `POST /membership/create-checkout-session`
    pub async fn create_checkout_session(
        &self,
        form: &CheckoutSessionForm,
    ) -> Result<Option<Value>, ClientError> {
        self.transport.post("/membership/create-checkout-session", form).await
    }

    /// `POST /membership/customer-portal`
    pub async fn customer_portal(
        &self,
        form: &CustomerPortalForm,
    ) -> Result<Option<Value>, ClientError> {
        self.transport.post("/membership/customer-portal", form).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_forms_serialize_with_wire_names() {
        let form = AddCircleMemberForm {
            account_username: "alice".to_string(),
            circle_id: 3,
            comment: "vouched".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&form).unwrap(),
            json!({"accountUsername": "alice", "circleId": 3, "comment": "vouched"})
        );

        let form = CheckoutSessionForm {
            base_url: "https://memberhub.example.org".to_string(),
            price_id: "price_123".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&form).unwrap(),
            json!({"baseUrl": "https://memberhub.example.org", "priceId": "price_123"})
        );
    }

    #[test]
    fn test_optional_form_fields_are_omitted() {
        let form = CompanyForm {
            id: None,
            name: "ACME".to_string(),
            contact: None,
            active: true,
        };
        assert_eq!(
            serde_json::to_value(&form).unwrap(),
            json!({"name": "ACME", "active": true})
        );
    }
}
