#[cfg(test)]
mod tests {
    use crate::schemas::ApiDoc;
    use utoipa::OpenApi;

    #[test]
    fn test_openapi_schema_generation() {
        // Test that the OpenAPI schema can be generated without errors
        let openapi = ApiDoc::openapi();

        assert!(openapi.components.is_some());
        let components = openapi.components.as_ref().unwrap();

        assert!(components.schemas.contains_key("ErrorResponse"));
        assert!(components.schemas.contains_key("HealthResponse"));
        assert!(components.schemas.contains_key("UserResponse"));
        assert!(components.schemas.contains_key("ProductResponse"));

        // Verify that the schema can be serialized to JSON without errors
        let json_result = serde_json::to_string(&openapi);
        assert!(json_result.is_ok());
    }

    #[test]
    fn test_all_routes_documented() {
        let openapi = ApiDoc::openapi();
        let paths = &openapi.paths.paths;

        for route in [
            "/",
            "/api/v1/register",
            "/api/v1/login",
            "/api/v1/users/{email}",
            "/categories",
            "/dresses/{category}",
            "/all-products",
            "/flash-products",
            "/products/{id}",
            "/top-reviews",
            "/create-order",
            "/orders",
            "/orders/{email}",
        ] {
            assert!(paths.contains_key(route), "missing path: {route}");
        }
    }

    #[test]
    fn test_error_response_schema_structure() {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.as_ref().unwrap();
        let error_response_schema = components.schemas.get("ErrorResponse").unwrap();

        if let utoipa::openapi::RefOr::T(utoipa::openapi::schema::Schema::Object(obj)) =
            error_response_schema
        {
            let properties = &obj.properties;
            assert!(properties.contains_key("error"));
            assert!(properties.contains_key("code"));
            assert!(properties.contains_key("success"));
        } else {
            panic!("ErrorResponse schema is not an object");
        }
    }
}
