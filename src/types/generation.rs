use serde::{Deserialize, Serialize};

/// Response from submitting a generation job to the external API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSubmission {
    /// Opaque key used to poll the job's status.
    pub subscription_key: String,
    /// Identifier of the generation task, used to resolve downloads.
    pub task_uuid: String,
}

/// Body of a status-check request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRequest {
    pub subscription_key: String,
}

/// Status of the jobs spawned by one submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatus {
    pub jobs: Vec<JobState>,
}

/// State of a single generation job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobState {
    pub uuid: String,
    pub status: String,
}

impl JobStatus {
    /// True once every job reports `Done`.
    pub fn is_complete(&self) -> bool {
        !self.jobs.is_empty() && self.jobs.iter().all(|j| j.status == "Done")
    }

    /// True if any job reports `Failed`.
    pub fn has_failed(&self) -> bool {
        self.jobs.iter().any(|j| j.status == "Failed")
    }
}

/// Body of a download-resolution request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadRequest {
    pub task_uuid: String,
}

/// Resolved download location for a finished task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResolution {
    pub download_url: String,
}
