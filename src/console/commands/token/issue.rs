use crate::configuration::get_configuration;
use crate::helpers::jwt;

pub struct IssueCommand {
    user_id: String,
    name: String,
    email: String,
    role: String,
    ttl_hours: i64,
}

impl IssueCommand {
    pub fn new(user_id: String, name: String, email: String, role: String, ttl_hours: i64) -> Self {
        Self {
            user_id,
            name,
            email,
            role,
            ttl_hours,
        }
    }

    fn claims(&self, now: i64) -> jwt::JwtClaims {
        jwt::JwtClaims {
            sub: self.user_id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
            exp: now + self.ttl_hours * 3600,
        }
    }
}

impl crate::console::commands::CallableTrait for IssueCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let settings = get_configuration()?;
        let claims = self.claims(chrono::Utc::now().timestamp());
        let token = jwt::encode(&claims, &settings.auth.jwt_secret)?;

        println!("{}", token);
        Ok(())
    }
}
