/// WGSL path-tracing kernel: fullscreen triangle, one new radiance sample
/// per pixel per frame, blended against the prior accumulation texture.
///
/// The `Uniforms` block must match `FrameUniforms` byte for byte.
pub const TRACER_SHADER: &str = r#"
struct CameraUniforms {
    origin: vec3<f32>,
    u: vec3<f32>,
    v: vec3<f32>,
    w: vec3<f32>,
}

struct Uniforms {
    camera: CameraUniforms,
    width: u32,
    height: u32,
    frame_count: u32,
}

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;
@group(0) @binding(1)
var prior_samples: texture_2d<f32>;
@group(0) @binding(2)
var accumulated_samples: texture_storage_2d<rgba32float, write>;

struct Ray {
    origin: vec3<f32>,
    direction: vec3<f32>,
}

struct Sphere {
    center: vec3<f32>,
    radius: f32,
    color: vec3<f32>,
}

struct Intersection {
    normal: vec3<f32>,
    t: f32,
    color: vec3<f32>,
}

struct Scatter {
    attenuation: vec3<f32>,
    ray: Ray,
}

const FOV_Y: f32 = 1.0471975512;
const MAX_BOUNCES: u32 = 4u;
const T_MIN: f32 = 0.001;
const T_MAX: f32 = 1e30;
const SPHERE_COUNT: u32 = 4u;

const SPHERES: array<Sphere, 4> = array<Sphere, 4>(
    Sphere(vec3<f32>(0.0, -100.5, -1.0), 100.0, vec3<f32>(0.5, 0.5, 0.5)),
    Sphere(vec3<f32>(0.0, 0.0, -1.2), 0.5, vec3<f32>(0.7, 0.3, 0.3)),
    Sphere(vec3<f32>(-1.1, 0.0, -1.0), 0.5, vec3<f32>(0.3, 0.7, 0.3)),
    Sphere(vec3<f32>(1.1, 0.0, -1.0), 0.5, vec3<f32>(0.3, 0.3, 0.8)),
);

// PCG hash; state advances per sample draw.
fn rand_f32(state: ptr<function, u32>) -> f32 {
    *state = *state * 747796405u + 2891336453u;
    var word = ((*state >> ((*state >> 28u) + 4u)) ^ *state) * 277803737u;
    word = (word >> 22u) ^ word;
    return f32(word) / 4294967295.0;
}

fn random_unit_vector(state: ptr<function, u32>) -> vec3<f32> {
    let z = rand_f32(state) * 2.0 - 1.0;
    let phi = rand_f32(state) * 6.28318530718;
    let r = sqrt(max(0.0, 1.0 - z * z));
    return vec3<f32>(r * cos(phi), r * sin(phi), z);
}

fn intersect_sphere(ray: Ray, sphere: Sphere) -> f32 {
    let oc = ray.origin - sphere.center;
    let a = dot(ray.direction, ray.direction);
    let half_b = dot(oc, ray.direction);
    let c = dot(oc, oc) - sphere.radius * sphere.radius;
    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 {
        return -1.0;
    }
    let sqrt_d = sqrt(discriminant);
    var t = (-half_b - sqrt_d) / a;
    if t < T_MIN {
        t = (-half_b + sqrt_d) / a;
    }
    if t < T_MIN {
        return -1.0;
    }
    return t;
}

fn intersect_scene(ray: Ray) -> Intersection {
    var hit: Intersection;
    hit.t = -1.0;
    var closest = T_MAX;
    var spheres = SPHERES;
    for (var i = 0u; i < SPHERE_COUNT; i = i + 1u) {
        let t = intersect_sphere(ray, spheres[i]);
        if t > 0.0 && t < closest {
            closest = t;
            let p = ray.origin + ray.direction * t;
            hit.t = t;
            hit.normal = normalize(p - spheres[i].center);
            hit.color = spheres[i].color;
        }
    }
    return hit;
}

fn scatter_lambertian(ray: Ray, hit: Intersection, state: ptr<function, u32>) -> Scatter {
    let p = ray.origin + ray.direction * hit.t;
    var direction = hit.normal + random_unit_vector(state);
    if dot(direction, direction) < 1e-8 {
        direction = hit.normal;
    }
    return Scatter(hit.color, Ray(p, normalize(direction)));
}

fn sky_color(direction: vec3<f32>) -> vec3<f32> {
    let t = 0.5 * (normalize(direction).y + 1.0);
    return mix(vec3<f32>(1.0, 1.0, 1.0), vec3<f32>(0.5, 0.7, 1.0), t);
}

fn trace(primary: Ray, state: ptr<function, u32>) -> vec3<f32> {
    var ray = primary;
    var attenuation = vec3<f32>(1.0, 1.0, 1.0);
    for (var bounce = 0u; bounce < MAX_BOUNCES; bounce = bounce + 1u) {
        let hit = intersect_scene(ray);
        if hit.t < 0.0 {
            return attenuation * sky_color(ray.direction);
        }
        let scatter = scatter_lambertian(ray, hit, state);
        attenuation = attenuation * scatter.attenuation;
        ray = scatter.ray;
    }
    return vec3<f32>(0.0, 0.0, 0.0);
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
}

@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> VertexOutput {
    var positions = array<vec2<f32>, 3>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(3.0, -1.0),
        vec2<f32>(-1.0, 3.0),
    );
    var out: VertexOutput;
    out.clip_position = vec4<f32>(positions[index], 0.0, 1.0);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let pixel = vec2<u32>(in.clip_position.xy);
    var rng = pixel.x * 1973u + pixel.y * 9277u + uniforms.frame_count * 26699u + 1u;

    // Primary ray through the jittered pixel center, in the camera basis.
    let size = vec2<f32>(f32(uniforms.width), f32(uniforms.height));
    let jitter = vec2<f32>(rand_f32(&rng), rand_f32(&rng)) - 0.5;
    let ndc = ((in.clip_position.xy + jitter) / size) * 2.0 - 1.0;
    let aspect = size.x / size.y;
    let tan_half_fov = tan(FOV_Y * 0.5);
    let direction = normalize(
        uniforms.camera.u * ndc.x * aspect * tan_half_fov
            - uniforms.camera.v * ndc.y * tan_half_fov
            + uniforms.camera.w,
    );
    let sample = trace(Ray(uniforms.camera.origin, direction), &rng);

    // Running average over frame_count prior samples.
    let prior = textureLoad(prior_samples, vec2<i32>(pixel), 0).rgb;
    let n = f32(uniforms.frame_count);
    let averaged = (prior * n + sample) / (n + 1.0);
    textureStore(accumulated_samples, vec2<i32>(pixel), vec4<f32>(averaged, 1.0));

    // Linear output; the sRGB swapchain format applies the transfer function.
    return vec4<f32>(averaged, 1.0);
}
"#;
