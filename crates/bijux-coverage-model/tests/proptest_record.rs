// SPDX-License-Identifier: Apache-2.0

use bijux_coverage_model::{ObservationRecord, RAW_DATA_FIELD_COUNT};
use proptest::prelude::*;

proptest! {
    #[test]
    fn decoded_fields_keep_their_positions(
        node in "[a-z_/:.]{1,24}",
        service in "[a-z0-9-]{1,12}",
        operation in "[A-Z][A-Za-z]{0,16}",
        params in proptest::collection::vec("[A-Z][a-zA-Z]{0,8}", 0..4),
        code in 100u16..600,
        data in ".{0,40}",
    ) {
        let joined = params.join(",");
        let code_text = code.to_string();
        let row = [
            node.as_str(), service.as_str(), operation.as_str(), joined.as_str(),
            "", code_text.as_str(), data.as_str(), "False",
        ];
        let rec = ObservationRecord::from_fields(&row).expect("decode");
        prop_assert_eq!(&rec.node_id, &node);
        prop_assert_eq!(&rec.service, &service);
        prop_assert_eq!(&rec.operation, &operation);
        prop_assert_eq!(rec.parameter_names().map(str::to_string).collect::<Vec<_>>(), params);
        prop_assert_eq!(rec.response_code, Some(code));
        prop_assert_eq!(&rec.response_data, &data);
    }

    #[test]
    fn any_other_arity_is_rejected(len in 0usize..16) {
        prop_assume!(len != RAW_DATA_FIELD_COUNT);
        let row = vec!["x"; len];
        prop_assert!(ObservationRecord::from_fields(&row).is_err());
    }
}
