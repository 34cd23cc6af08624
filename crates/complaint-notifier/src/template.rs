//! 模板数据组装
//!
//! 将解析出的联系人、变更描述和请求中的透传字段合并为扁平的模板数据。

use crate::error::{NotificationError, Result};
use crate::models::{Contact, NotificationRequest, TemplatePayload, keys};

pub struct TemplateAssembler;

impl TemplateAssembler {
    /// 组装模板数据
    ///
    /// 透传字段按固定顺序检查，遇到第一个空值立即返回 `MissingField`，
    /// 不会产生部分填充的模板数据。
    pub fn assemble(
        request: &NotificationRequest,
        client: &Contact,
        creator: &Contact,
        expert: &Contact,
        difference: &str,
    ) -> Result<TemplatePayload> {
        let mut payload = TemplatePayload::new();
        payload.insert(keys::CLIENT_NAME, client.full_name.as_str());
        payload.insert(keys::CREATOR_NAME, creator.full_name.as_str());
        payload.insert(keys::EXPERT_NAME, expert.full_name.as_str());
        payload.insert(keys::DIFFERENCES, difference);

        for (field, value) in request.passthrough_fields() {
            let key = field.to_uppercase();
            let Some(value) = value else {
                return Err(NotificationError::MissingField { field, key });
            };
            payload.insert(key, value);
        }

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Differences, Identifier, NotificationType};

    fn request() -> NotificationRequest {
        NotificationRequest {
            reseller_id: Some(1),
            notification_type: Some(NotificationType::Change),
            client_id: Some(Identifier::from(10)),
            creator_id: Some(Identifier::from(20)),
            expert_id: Some(Identifier::from(30)),
            complaint_id: Some("500".to_string()),
            complaint_number: Some("CMP-500".to_string()),
            consumption_id: Some("600".to_string()),
            consumption_number: Some("CNS-600".to_string()),
            agreement_number: Some("AG-77".to_string()),
            date: Some("2024-03-01".to_string()),
            differences: Some(Differences::new(1, 2)),
        }
    }

    fn assemble(request: &NotificationRequest) -> Result<TemplatePayload> {
        TemplateAssembler::assemble(
            request,
            &Contact::contractor(10, "Acme Ltd", 1),
            &Contact::employee(20, "Jane Roe"),
            &Contact::employee(30, "John Doe"),
            "Position status has changed from New to Closed",
        )
    }

    #[test]
    fn test_assemble_full_payload() {
        let payload = assemble(&request()).unwrap();

        assert_eq!(
            payload.keys().collect::<Vec<_>>(),
            vec![
                "CLIENT_NAME",
                "CREATOR_NAME",
                "EXPERT_NAME",
                "DIFFERENCES",
                "COMPLAINTID",
                "COMPLAINTNUMBER",
                "CREATORID",
                "EXPERTID",
                "CLIENTID",
                "CONSUMPTIONID",
                "CONSUMPTIONNUMBER",
                "AGREEMENTNUMBER",
                "DATE",
            ]
        );
        assert_eq!(payload.get("CLIENT_NAME"), Some("Acme Ltd"));
        assert_eq!(payload.get("CREATOR_NAME"), Some("Jane Roe"));
        assert_eq!(payload.get("EXPERT_NAME"), Some("John Doe"));
        assert_eq!(
            payload.differences(),
            "Position status has changed from New to Closed"
        );
        assert_eq!(payload.get("COMPLAINTID"), Some("500"));
        assert_eq!(payload.get("CLIENTID"), Some("10"));
        assert_eq!(payload.get("AGREEMENTNUMBER"), Some("AG-77"));
        assert_eq!(payload.get("DATE"), Some("2024-03-01"));
    }

    #[test]
    fn test_empty_difference_is_kept() {
        let payload = TemplateAssembler::assemble(
            &request(),
            &Contact::contractor(10, "Acme Ltd", 1),
            &Contact::employee(20, "Jane Roe"),
            &Contact::employee(30, "John Doe"),
            "",
        )
        .unwrap();

        assert_eq!(payload.get("DIFFERENCES"), Some(""));
    }

    #[test]
    fn test_missing_agreement_number() {
        let mut request = request();
        request.agreement_number = Some(String::new());

        let err = assemble(&request).unwrap_err();
        match err {
            NotificationError::MissingField { field, key } => {
                assert_eq!(field, "agreementNumber");
                assert_eq!(key, "AGREEMENTNUMBER");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_fail_fast_on_first_missing_field() {
        let mut request = request();
        request.complaint_number = None;
        request.date = None;

        let err = assemble(&request).unwrap_err();
        assert!(matches!(
            err,
            NotificationError::MissingField {
                field: "complaintNumber",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_consumption_id_is_missing() {
        let mut request = request();
        request.consumption_id = Some("0".to_string());

        let err = assemble(&request).unwrap_err();
        assert!(matches!(
            err,
            NotificationError::MissingField {
                field: "consumptionId",
                ..
            }
        ));
    }

    #[test]
    fn test_record_ids_copied_verbatim() {
        let mut request = request();
        request.complaint_id = Some("00042".to_string());
        request.consumption_id = Some("C-100".to_string());

        let payload = assemble(&request).unwrap();

        assert_eq!(payload.get("COMPLAINTID"), Some("00042"));
        assert_eq!(payload.get("CONSUMPTIONID"), Some("C-100"));
    }

    #[test]
    fn test_numeric_zero_text_is_missing() {
        let mut request = request();
        request.agreement_number = Some("0".to_string());

        let err = assemble(&request).unwrap_err();
        assert!(matches!(
            err,
            NotificationError::MissingField {
                field: "agreementNumber",
                ..
            }
        ));
    }
}
