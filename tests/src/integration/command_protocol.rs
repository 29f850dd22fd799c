//! # Command Protocol Flows
//!
//! Drives the ledger with JSON envelopes, through `LedgerCommandHandler` and
//! through the node's line loop, and checks the wire shape of responses.

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tokio::io::BufReader;
    use uuid::Uuid;
    use vl_node::genesis::AuthorityBootstrap;
    use vl_node::{GenesisConfig, LedgerNode, NodeConfig};
    use vl_registration::prelude::*;

    fn envelope(id: u128, command: Value) -> String {
        json!({
            "correlation_id": Uuid::from_u128(id),
            "command": command,
        })
        .to_string()
    }

    fn register(jurisdiction: &str, hash: &str) -> Value {
        json!({
            "op": "register_voter",
            "caller": "ST1TEST",
            "user_principal": "ST1TEST",
            "user_id": "userhash123",
            "jurisdiction_id": jurisdiction,
            "registration_hash": hash,
            "title": "Voter Reg",
            "description": "Desc",
        })
    }

    fn handler() -> LedgerCommandHandler<RegistrationService> {
        let (service, _) = create_test_service();
        LedgerCommandHandler::new(Arc::new(service))
    }

    async fn node_with_authority() -> LedgerNode {
        let genesis = GenesisConfig {
            authority: Some(AuthorityBootstrap {
                caller: Principal::from("ST1TEST"),
                authority: Principal::from("ST2TEST"),
            }),
            ..GenesisConfig::devnet()
        };
        LedgerNode::build(&NodeConfig::from_lookup(|_| None), &genesis)
            .await
            .unwrap()
    }

    // =============================================================================
    // HANDLER
    // =============================================================================

    #[tokio::test]
    async fn test_settings_flow_over_wire() {
        let handler = handler();

        let r = handler
            .handle_line(&envelope(
                1,
                json!({"op": "set_registration_fee", "caller": "ST2TEST", "new_fee": 5}),
            ))
            .await;
        assert_eq!(r.error_code(), Some(1013));

        let r = handler
            .handle_line(&envelope(
                2,
                json!({"op": "set_authority_contract", "caller": "ST1TEST", "authority": "ST2TEST"}),
            ))
            .await;
        assert!(r.is_ok());

        let r = handler
            .handle_line(&envelope(
                3,
                json!({"op": "set_authority_contract", "caller": "ST1TEST", "authority": "ST3TEST"}),
            ))
            .await;
        assert_eq!(r.error_code(), Some(1014));

        let r = handler
            .handle_line(&envelope(
                4,
                json!({"op": "set_registration_fee", "caller": "ST2TEST", "new_fee": -1}),
            ))
            .await;
        assert_eq!(r.error_code(), Some(1018));

        let r = handler
            .handle_line(&envelope(
                5,
                json!({"op": "set_max_registrations", "caller": "ST2TEST", "new_max": 0}),
            ))
            .await;
        assert_eq!(r.error_code(), Some(1017));

        let r = handler
            .handle_line(&envelope(
                6,
                json!({"op": "set_max_registrations", "caller": "ST1TEST", "new_max": 10}),
            ))
            .await;
        assert_eq!(r.error_code(), Some(1019));

        let r = handler
            .handle_line(&envelope(7, json!({"op": "get_settings"})))
            .await;
        assert_eq!(r.correlation_id, Uuid::from_u128(7));
        assert_eq!(
            r.outcome,
            CommandOutcome::Ok(LedgerReply::Settings(LedgerSettings {
                max_registrations: 1_000_000,
                registration_fee: 100,
                authority_contract: Some(Principal::from("ST2TEST")),
            }))
        );
    }

    #[tokio::test]
    async fn test_error_payload_shape() {
        let handler = handler();
        let response = handler
            .handle_line(&envelope(9, register("USA", "regHash123")))
            .await;

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "correlation_id": Uuid::from_u128(9),
                "outcome": {"err": {
                    "code": 1013,
                    "kind": "authority_not_configured",
                    "message": "authority contract not configured"
                }}
            })
        );
    }

    #[tokio::test]
    async fn test_unknown_op_is_malformed() {
        let handler = handler();
        let response = handler
            .handle_line(&envelope(1, json!({"op": "delete_registration"})))
            .await;
        assert_eq!(response.error_code(), Some(0));
        assert_eq!(response.correlation_id, Uuid::nil());
    }

    // =============================================================================
    // NODE LOOP
    // =============================================================================

    #[tokio::test]
    async fn test_node_session() {
        let node = node_with_authority().await;
        let input = [
            envelope(1, register("USA", "regHash123")),
            envelope(2, register("USA", "regHash123")),
            envelope(
                3,
                json!({
                    "op": "update_registration",
                    "caller": "ST1TEST",
                    "user_id": "userhash123",
                    "jurisdiction_id": "USA",
                    "new_title": "Edited",
                    "new_description": "",
                }),
            ),
            envelope(
                4,
                json!({
                    "op": "update_registration_status",
                    "caller": "ST1TEST",
                    "user_id": "userhash123",
                    "jurisdiction_id": "USA",
                    "new_status": "archived",
                }),
            ),
            envelope(
                5,
                json!({"op": "get_registration", "user_id": "userhash123", "jurisdiction_id": "USA"}),
            ),
            envelope(
                6,
                json!({"op": "get_registration_update", "user_id": "userhash123", "jurisdiction_id": "USA"}),
            ),
            envelope(7, json!({"op": "get_registration_count"})),
            envelope(
                8,
                json!({"op": "get_jurisdiction_reg_count", "jurisdiction_id": "EU"}),
            ),
        ]
        .join("\n");

        let mut output = Vec::new();
        let summary = node
            .run(BufReader::new(input.as_bytes()), &mut output)
            .await
            .unwrap();
        assert_eq!(summary.processed, 8);
        assert_eq!(summary.failed, 1);

        let responses: Vec<CommandResponse> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        for (i, response) in responses.iter().enumerate() {
            assert_eq!(response.correlation_id, Uuid::from_u128(i as u128 + 1));
        }
        assert_eq!(responses[1].error_code(), Some(1001));

        // Heights: start 1, one per line.
        match &responses[4].outcome {
            CommandOutcome::Ok(LedgerReply::Registration(Some(reg))) => {
                assert_eq!(reg.title, "Edited");
                assert_eq!(reg.status, RegistrationStatus::Archived);
                assert_eq!(reg.timestamp, 4);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        match &responses[5].outcome {
            CommandOutcome::Ok(LedgerReply::Update(Some(update))) => {
                assert_eq!(update.update_timestamp, 3);
                assert_eq!(update.updater, Principal::from("ST1TEST"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(responses[6].outcome, CommandOutcome::Ok(LedgerReply::Count(1)));
        assert_eq!(responses[7].outcome, CommandOutcome::Ok(LedgerReply::Count(0)));

        assert_eq!(node.collaborators().fees.total_collected(), 100);
    }

    #[tokio::test]
    async fn test_genesis_file_drives_node() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            json!({
                "identities": [{"principal": "P1", "identity_hash": "voter-1"}],
                "jurisdictions": [{"id": "CA"}],
                "scores": [{"jurisdiction_id": "CA", "registration_hash": "h1", "score": 55}],
                "admins": [],
                "balances": [{"principal": "P1", "amount": 10}],
                "registration_fee": 10,
                "authority": {"caller": "ROOT", "authority": "AUTH"}
            })
        )
        .unwrap();

        let genesis = GenesisConfig::load(file.path()).unwrap();
        let node = LedgerNode::build(&NodeConfig::default(), &genesis)
            .await
            .unwrap();

        let command = json!({
            "op": "register_voter",
            "caller": "P1",
            "user_principal": "P1",
            "user_id": "voter-1",
            "jurisdiction_id": "CA",
            "registration_hash": "h1",
            "title": "t",
        });
        let first = node.process_line(&envelope(1, command.clone())).await;
        match first.outcome {
            CommandOutcome::Ok(LedgerReply::Registered(reg)) => assert_eq!(reg.eligibility_score, 55),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(node.collaborators().fees.balance_of(&Principal::from("P1")), Some(0));

        // Balance exhausted: the next registration fails with TransferFailed.
        let mut second = command;
        node.collaborators().jurisdictions.add_jurisdiction(JurisdictionId::from("NV"));
        second["jurisdiction_id"] = json!("NV");
        let response = node.process_line(&envelope(2, second)).await;
        assert_eq!(response.error_code(), Some(1015));
    }
}
