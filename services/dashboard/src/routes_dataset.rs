use axum::{extract::State, Json};

use crate::state::SharedState;
use crate::types::DatasetInfo;

pub async fn get_dataset(State(state): State<SharedState>) -> Json<DatasetInfo> {
    let table = state.table();

    Json(DatasetInfo {
        path: state.dataset.path.display().to_string(),
        rows: table.len(),
        columns: table.columns().to_vec(),
        range: table.full_range(),
        content_hash: state.dataset.content_hash,
        loaded_at: state.loaded_at,
    })
}

pub async fn get_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use rowtable::{read_csv, LoadedDataset};
    use std::sync::Arc;

    const CSV: &str = "\
seller_id,seller_city,geolocation_lat_seller,geolocation_lng_seller,customer_id,customer_city,geolocation_lat_customer,geolocation_lng_customer,response_category,response_time_hour,product_category_name_english,review_score,order_purchase_timestamp,order_estimated_delivery_date
s1,sao paulo,-23.5,-46.6,c1,rio de janeiro,-22.9,-43.2,fast,1,toys,5,2017-06-02 10:00:00,2017-06-20 00:00:00
s2,curitiba,-25.4,-49.3,c2,campinas,-22.9,-47.1,slow,20,auto,,2017-08-30 18:12:00,2017-09-20 00:00:00
";

    #[tokio::test]
    async fn test_dataset_info() {
        let content_hash: [u8; 32] = sample_hash();
        let state = Arc::new(AppState::new(LoadedDataset {
            path: "data/all_data.csv".into(),
            table: read_csv(CSV.as_bytes()).unwrap(),
            content_hash,
        }));

        let Json(info) = get_dataset(State(state)).await;
        let json = serde_json::to_value(&info).unwrap();

        assert_eq!(json["rows"], 2);
        assert_eq!(json["path"], "data/all_data.csv");
        assert_eq!(json["range"]["start_date"], "2017-06-02");
        assert_eq!(json["range"]["end_date"], "2017-08-30");
        assert_eq!(json["content_hash_hex"], hex::encode(content_hash));
        assert_eq!(info.columns.len(), 14);
    }

    #[tokio::test]
    async fn test_health() {
        let Json(body) = get_health().await;
        assert_eq!(body["status"], "ok");
    }

    fn sample_hash() -> [u8; 32] {
        let mut h = [0u8; 32];
        for (i, b) in h.iter_mut().enumerate() {
            *b = i as u8;
        }
        h
    }
}
