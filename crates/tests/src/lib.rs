
#[cfg(test)]
mod background_generate_tests;


#[cfg(test)]
mod background_upstream_tests;

#[cfg(test)]
mod rate_limit_tests;

#[cfg(test)]
mod health_tests;

#[cfg(test)]
mod workflow_client_tests;
