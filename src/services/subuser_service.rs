// src/services/subuser_service.rs

use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::{
    common::error::AppError,
    db::SubUserRepository,
    models::subuser::{CreateSubUserPayload, SubUser, SubUserAccessMethod, UpdateSubUserPayload},
};

// Códigos RFID chegam do leitor em formatos variados ("04 a1 b2", "04A1B2")
pub(crate) fn normalize_rfid_code(code: &str) -> String {
    code.chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != '-')
        .collect::<String>()
        .to_ascii_uppercase()
}

pub(crate) fn normalize_access_id(method: SubUserAccessMethod, access_id: &str) -> String {
    match method {
        SubUserAccessMethod::Rfid => normalize_rfid_code(access_id),
        SubUserAccessMethod::Fingerprint => access_id.trim().to_string(),
    }
}

// Um código só de separadores ("::", "- -") passa na validação mas some ao normalizar
fn canonical_access_id(method: SubUserAccessMethod, access_id: &str) -> Result<String, AppError> {
    let canonical = normalize_access_id(method, access_id);
    if canonical.is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("validation.access_id".into());
        let mut errors = ValidationErrors::new();
        errors.add("access_id", err);
        return Err(AppError::ValidationError(errors));
    }
    Ok(canonical)
}

#[derive(Clone)]
pub struct SubUserService {
    subuser_repo: SubUserRepository,
}

impl SubUserService {
    pub fn new(subuser_repo: SubUserRepository) -> Self {
        Self { subuser_repo }
    }

    pub async fn create_subuser(
        &self,
        admin_id: Uuid,
        payload: &CreateSubUserPayload,
    ) -> Result<SubUser, AppError> {
        let access_id = canonical_access_id(payload.access_method, &payload.access_id)?;
        let subuser = self
            .subuser_repo
            .create(admin_id, payload.name.trim(), payload.access_method, &access_id)
            .await?;

        tracing::info!(subuser_id = %subuser.id, method = ?subuser.access_method, "Subusuário criado");
        Ok(subuser)
    }

    pub async fn list_subusers(
        &self,
        admin_id: Uuid,
        access_method: Option<SubUserAccessMethod>,
    ) -> Result<Vec<SubUser>, AppError> {
        self.subuser_repo.list_by_admin(admin_id, access_method).await
    }

    pub async fn get_subuser(&self, admin_id: Uuid, id: Uuid) -> Result<SubUser, AppError> {
        self.subuser_repo
            .find_for_admin(id, admin_id)
            .await?
            .ok_or(AppError::SubUserNotFound)
    }

    pub async fn update_subuser(
        &self,
        admin_id: Uuid,
        id: Uuid,
        payload: &UpdateSubUserPayload,
    ) -> Result<SubUser, AppError> {
        self.subuser_repo
            .update(id, admin_id, payload.name.as_deref().map(str::trim), payload.is_active)
            .await?
            .ok_or(AppError::SubUserNotFound)
    }

    /// Remove o subusuário. Com `only_method`, só remove se a credencial for daquele tipo.
    pub async fn delete_subuser(
        &self,
        admin_id: Uuid,
        id: Uuid,
        only_method: Option<SubUserAccessMethod>,
    ) -> Result<(), AppError> {
        let removed = self.subuser_repo.delete(id, admin_id, only_method).await?;
        if removed == 0 {
            return Err(AppError::SubUserNotFound);
        }
        tracing::info!(subuser_id = %id, "Subusuário removido");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("04 a1 b2 c3", "04A1B2C3")]
    #[case("04:A1:B2:C3", "04A1B2C3")]
    #[case("04-a1-b2-c3", "04A1B2C3")]
    #[case(" 04a1b2c3\n", "04A1B2C3")]
    fn rfid_codes_are_canonical(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_rfid_code(raw), expected);
    }

    #[test]
    fn fingerprint_ids_are_only_trimmed() {
        assert_eq!(
            normalize_access_id(SubUserAccessMethod::Fingerprint, " slot-07 "),
            "slot-07"
        );
    }

    #[rstest]
    #[case(SubUserAccessMethod::Rfid, "::")]
    #[case(SubUserAccessMethod::Rfid, " - - ")]
    #[case(SubUserAccessMethod::Fingerprint, "   ")]
    fn separator_only_credentials_are_rejected(#[case] method: SubUserAccessMethod, #[case] raw: &str) {
        let err = canonical_access_id(method, raw).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn canonical_access_id_keeps_real_codes() {
        assert_eq!(
            canonical_access_id(SubUserAccessMethod::Rfid, "04:a1:b2:c3").unwrap(),
            "04A1B2C3"
        );
    }
}
