use std::env;
use std::net::SocketAddr;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_host: String,
    pub bind_port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_host = env::var("BIND_HOST").unwrap_or_else(|_| {
            warn!("BIND_HOST not set, defaulting to 0.0.0.0");
            "0.0.0.0".to_string()
        });

        let bind_port = match env::var("BIND_PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("BIND_PORT is not a valid port, defaulting to 3000");
                3000
            }),
            Err(_) => {
                warn!("BIND_PORT not set, defaulting to 3000");
                3000
            }
        };

        Self { bind_host, bind_port }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        let host = self
            .bind_host
            .parse()
            .unwrap_or_else(|_| std::net::IpAddr::from([0, 0, 0, 0]));
        SocketAddr::new(host, self.bind_port)
    }
}
